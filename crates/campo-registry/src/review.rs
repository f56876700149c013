//! # Draft Review
//!
//! Runs the `campo-core` rules over a [`ProducerDraft`] and collects every
//! problem as an [`Issue`] addressed by a typed [`FieldPath`].
//!
//! ## Rules
//!
//! | Rule | Path | Severity |
//! |------|------|----------|
//! | Non-empty identifier must be a valid CPF/CNPJ | `cpf_cnpj` | error |
//! | Area figures must be finite and > 0 (if configured) | `fazendas[i].area_*` | error |
//! | `agricultural + vegetation <= total` (advisory: once all three are non-zero) | `fazendas[i]` | per [`AreaPolicy`](crate::config::AreaPolicy) |
//!
//! An empty identifier is not reported here: the field simply has not been
//! filled in yet. [`ProducerForm::submit`](crate::form::ProducerForm::submit)
//! rejects it.

use serde::Serialize;

use campo_core::{check_identifier, AreaField, AreaTriple, ValidationError};

use crate::config::RegistryConfig;
use crate::model::ProducerDraft;

/// Location of a field inside a producer draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum FieldPath {
    /// The producer's CPF/CNPJ.
    TaxId,
    /// A farm as a whole (cross-field rules).
    Farm { index: usize },
    /// One area figure of a farm.
    FarmArea { index: usize, area: AreaField },
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaxId => f.write_str("cpf_cnpj"),
            Self::Farm { index } => write!(f, "fazendas[{index}]"),
            Self::FarmArea { index, area } => write!(f, "fazendas[{index}].{area}"),
        }
    }
}

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Shown to the user, does not block submission.
    Warning,
    /// Blocks submission.
    Error,
}

/// One problem found in a draft.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub path: FieldPath,
    pub severity: Severity,
    pub error: ValidationError,
}

impl Issue {
    pub fn new(path: FieldPath, severity: Severity, error: ValidationError) -> Self {
        Self {
            path,
            severity,
            error,
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.error)
    }
}

/// Issues found by a review, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Review {
    issues: Vec<Issue>,
}

impl Review {
    /// Record an issue and log it.
    pub fn push(&mut self, issue: Issue) {
        match issue.severity {
            Severity::Warning => {
                tracing::warn!(path = %issue.path, error = %issue.error, "draft warning")
            }
            Severity::Error => {
                tracing::debug!(path = %issue.path, error = %issue.error, "draft error")
            }
        }
        self.issues.push(issue);
    }

    /// All issues.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Error-severity issues.
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    /// Warning-severity issues.
    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    /// Issues for one path.
    pub fn at(&self, path: FieldPath) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.path == path)
    }

    /// True when any issue blocks submission.
    pub fn is_blocking(&self) -> bool {
        self.errors().next().is_some()
    }

    /// True when nothing was found.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Keep only the blocking issues.
    pub fn into_errors(self) -> Vec<Issue> {
        self.issues
            .into_iter()
            .filter(|i| i.severity == Severity::Error)
            .collect()
    }
}

/// Review a whole producer draft.
pub fn review_producer(draft: &ProducerDraft, config: &RegistryConfig) -> Review {
    let mut review = Review::default();

    if !draft.tax_id.trim().is_empty() {
        if let Err(error) = check_identifier(&draft.tax_id) {
            review.push(Issue::new(FieldPath::TaxId, Severity::Error, error));
        }
    }

    for (index, farm) in draft.farms.iter().enumerate() {
        review_farm(index, &farm.areas, config, &mut review);
    }

    review
}

/// Review the area figures of the farm at `index`, appending to `review`.
pub fn review_farm(index: usize, areas: &AreaTriple, config: &RegistryConfig, review: &mut Review) {
    if config.require_positive_areas {
        if let Err(error) = areas.check_positive() {
            let area = match &error {
                ValidationError::NonPositiveArea { field, .. }
                | ValidationError::NonFiniteArea { field } => *field,
                _ => AreaField::Total,
            };
            review.push(Issue::new(
                FieldPath::FarmArea { index, area },
                Severity::Error,
                error,
            ));
        }
    }

    if config.checks_area_sum(areas) {
        if let Err(error) = areas.check() {
            review.push(Issue::new(
                FieldPath::Farm { index },
                config.area_policy.severity(),
                error,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FarmDraft;

    fn draft(tax_id: &str, areas: &[AreaTriple]) -> ProducerDraft {
        ProducerDraft {
            tax_id: tax_id.to_string(),
            name: "Produtor".to_string(),
            farms: areas
                .iter()
                .map(|a| FarmDraft {
                    areas: *a,
                    ..FarmDraft::default()
                })
                .collect(),
        }
    }

    #[test]
    fn clean_draft() {
        let d = draft("123.456.789-09", &[AreaTriple::new(1000.0, 600.0, 400.0)]);
        let review = review_producer(&d, &RegistryConfig::default());
        assert!(review.is_clean());
        assert!(!review.is_blocking());
    }

    #[test]
    fn empty_tax_id_not_reported() {
        let review = review_producer(&draft("", &[]), &RegistryConfig::default());
        assert!(review.is_clean());
        let review = review_producer(&draft("   ", &[]), &RegistryConfig::default());
        assert!(review.is_clean());
    }

    #[test]
    fn invalid_tax_id_is_an_error() {
        let review = review_producer(&draft("123.456.789-00", &[]), &RegistryConfig::default());
        assert!(review.is_blocking());
        let issue = &review.issues()[0];
        assert_eq!(issue.path, FieldPath::TaxId);
        assert!(matches!(
            issue.error,
            ValidationError::CheckDigitMismatch { position: 10, .. }
        ));
    }

    #[test]
    fn area_sum_advisory_is_a_warning() {
        let d = draft("12345678909", &[AreaTriple::new(1000.0, 600.0, 500.0)]);
        let review = review_producer(&d, &RegistryConfig::default());
        assert!(!review.is_blocking());
        let warnings: Vec<_> = review.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].path, FieldPath::Farm { index: 0 });
    }

    #[test]
    fn area_sum_blocking_is_an_error() {
        let d = draft("12345678909", &[AreaTriple::new(1000.0, 600.0, 500.0)]);
        let review = review_producer(&d, &RegistryConfig::blocking());
        assert!(review.is_blocking());
        assert_eq!(review.at(FieldPath::Farm { index: 0 }).count(), 1);
    }

    #[test]
    fn advisory_sum_waits_for_all_figures() {
        let config = RegistryConfig {
            require_positive_areas: false,
            ..RegistryConfig::default()
        };
        // Would exceed the total, but vegetation is still empty.
        let d = draft("", &[AreaTriple::new(10.0, 20.0, 0.0)]);
        assert!(review_producer(&d, &config).is_clean());
    }

    #[test]
    fn blocking_sum_checked_with_zero_figures() {
        let config = RegistryConfig {
            require_positive_areas: false,
            ..RegistryConfig::blocking()
        };
        let d = draft("", &[AreaTriple::new(10.0, 20.0, 0.0)]);
        let review = review_producer(&d, &config);
        assert!(review.is_blocking());
        let errors: Vec<_> = review.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, FieldPath::Farm { index: 0 });
        assert!(matches!(
            errors[0].error,
            ValidationError::AreaSumExceedsTotal { .. }
        ));
    }

    #[test]
    fn non_positive_area_points_at_the_field() {
        let d = draft("", &[AreaTriple::new(100.0, 50.0, 50.0), AreaTriple::new(100.0, -1.0, 50.0)]);
        let review = review_producer(&d, &RegistryConfig::default());
        let errors: Vec<_> = review.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].path,
            FieldPath::FarmArea {
                index: 1,
                area: AreaField::Agricultural
            }
        );
    }

    #[test]
    fn positive_check_can_be_disabled() {
        let config = RegistryConfig {
            require_positive_areas: false,
            ..RegistryConfig::default()
        };
        let d = draft("", &[AreaTriple::new(0.0, 0.0, 0.0)]);
        assert!(review_producer(&d, &config).is_clean());
    }

    #[test]
    fn into_errors_drops_warnings() {
        let d = draft(
            "123",
            &[AreaTriple::new(10.0, 8.0, 8.0)],
        );
        let review = review_producer(&d, &RegistryConfig::default());
        assert_eq!(review.issues().len(), 2);
        let errors = review.into_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, FieldPath::TaxId);
    }

    #[test]
    fn path_display() {
        assert_eq!(FieldPath::TaxId.to_string(), "cpf_cnpj");
        assert_eq!(FieldPath::Farm { index: 2 }.to_string(), "fazendas[2]");
        assert_eq!(
            FieldPath::FarmArea {
                index: 0,
                area: AreaField::Total
            }
            .to_string(),
            "fazendas[0].area_total"
        );
    }

    #[test]
    fn path_serializes_tagged() {
        let json = serde_json::to_value(FieldPath::FarmArea {
            index: 1,
            area: AreaField::Vegetation,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"field": "farm_area", "index": 1, "area": "vegetation"})
        );
    }
}
