//! # Taxpayer Identifiers
//!
//! Dispatch, display formatting and the validated [`TaxId`] newtype for the
//! two Brazilian taxpayer identifiers a rural producer can register with.
//!
//! ## Kinds
//!
//! - CPF (Cadastro de Pessoas Físicas): 11 digits, `DDD.DDD.DDD-DD`.
//! - CNPJ (Cadastro Nacional da Pessoa Jurídica): 14 digits, `DD.DDD.DDD/DDDD-DD`.
//!
//! The kind is decided by the normalized digit count alone. A 14-digit
//! string with a bad checksum is still an [`IdentifierKind::Organization`]
//! as far as formatting is concerned.
//!
//! ## Validation
//!
//! [`validate_identifier`] and [`format_identifier`] are total and never
//! fail. [`check_identifier`] and [`TaxId::new`] report why an input was
//! rejected.

use serde::{Deserialize, Serialize};

use crate::checksum::{check_individual, check_organization};
use crate::digits::normalize;
use crate::error::ValidationError;

/// Identifier kind, decided by normalized length only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    /// CPF, 11 digits.
    Individual,
    /// CNPJ, 14 digits.
    Organization,
    /// Any other length, including zero.
    Unrecognized,
}

impl IdentifierKind {
    /// Classify a digit count.
    pub fn from_len(len: usize) -> Self {
        match len {
            11 => Self::Individual,
            14 => Self::Organization,
            _ => Self::Unrecognized,
        }
    }

    /// Normalize `raw` and classify the resulting length.
    pub fn detect(raw: &str) -> Self {
        Self::from_len(normalize(raw).len())
    }

    /// Required digit count, or `None` for [`IdentifierKind::Unrecognized`].
    pub fn digit_count(self) -> Option<usize> {
        match self {
            Self::Individual => Some(11),
            Self::Organization => Some(14),
            Self::Unrecognized => None,
        }
    }

    /// Short label used in messages (`CPF`, `CNPJ`).
    pub fn label(self) -> &'static str {
        match self {
            Self::Individual => "CPF",
            Self::Organization => "CNPJ",
            Self::Unrecognized => "unrecognized identifier",
        }
    }
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Validate `raw` as whichever identifier its length says it is.
///
/// # Errors
///
/// - [`ValidationError::UnrecognizedLength`] when the normalized length is
///   neither 11 nor 14. No checksum is computed in that case.
/// - Any error of [`check_individual`] / [`check_organization`] otherwise.
pub fn check_identifier(raw: &str) -> Result<IdentifierKind, ValidationError> {
    let digits = normalize(raw);
    match IdentifierKind::from_len(digits.len()) {
        IdentifierKind::Individual => check_individual(&digits).map(|()| IdentifierKind::Individual),
        IdentifierKind::Organization => {
            check_organization(&digits).map(|()| IdentifierKind::Organization)
        }
        IdentifierKind::Unrecognized => Err(ValidationError::UnrecognizedLength {
            digits: digits.len(),
        }),
    }
}

/// True when `raw` is a valid CPF (11 digits) or CNPJ (14 digits).
///
/// Wrong length and wrong checksum both yield `false`.
pub fn validate_identifier(raw: &str) -> bool {
    check_identifier(raw).is_ok()
}

/// Render `raw` in the punctuated display form of its kind.
///
/// The input is normalized first, so already-formatted values come back
/// unchanged. Inputs whose normalized length is neither 11 nor 14 are
/// returned verbatim, punctuation and all. Checksums are not consulted.
///
/// ```
/// use campo_core::format_identifier;
/// assert_eq!(format_identifier("12345678909"), "123.456.789-09");
/// assert_eq!(format_identifier("11222333000181"), "11.222.333/0001-81");
/// assert_eq!(format_identifier("12.34"), "12.34");
/// ```
pub fn format_identifier(raw: &str) -> String {
    let digits = normalize(raw);
    match IdentifierKind::from_len(digits.len()) {
        IdentifierKind::Individual => format!(
            "{}.{}.{}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..]
        ),
        IdentifierKind::Organization => format!(
            "{}.{}.{}/{}-{}",
            &digits[..2],
            &digits[2..5],
            &digits[5..8],
            &digits[8..12],
            &digits[12..]
        ),
        IdentifierKind::Unrecognized => raw.to_string(),
    }
}

/// A checksum-valid CPF or CNPJ in canonical digit-only form.
///
/// Accepts any punctuation on input (`"123.456.789-09"`,
/// `"12345678909"`, `" 123 456 789 09 "`). Serializes as the bare digits,
/// which is what the registry API stores; [`Display`](std::fmt::Display)
/// renders the punctuated form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TaxId(String);

// Deserialized values are validated through `new`.
impl<'de> Deserialize<'de> for TaxId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(serde::de::Error::custom)
    }
}

impl TaxId {
    /// Normalize and validate a raw identifier.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] produced by [`check_identifier`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let digits = normalize(value.as_ref());
        check_identifier(&digits)?;
        Ok(Self(digits))
    }

    /// Canonical digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// CPF or CNPJ. Never [`IdentifierKind::Unrecognized`].
    pub fn kind(&self) -> IdentifierKind {
        IdentifierKind::from_len(self.0.len())
    }

    /// Punctuated display form.
    pub fn formatted(&self) -> String {
        format_identifier(&self.0)
    }

    /// Consume the identifier, returning the canonical digits.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for TaxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl std::str::FromStr for TaxId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for TaxId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
