//! # Producer Form
//!
//! Index-addressed editing of a [`ProducerDraft`]: farms and crops are
//! added, removed and edited by position, the way a form with repeating
//! sections works. The identifier field is masked as the user types, and
//! [`ProducerForm::submit`] is the only way to get a draft out for
//! sending to the registry.

use campo_core::{check_identifier, format_identifier, normalize, AreaField, ValidationError};

use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::model::{CropDraft, FarmDraft, Producer, ProducerDraft};
use crate::review::{review_producer, FieldPath, Issue, Review, Severity};

const FARMS: &str = "fazendas";
const CROPS: &str = "culturas";

/// Editable producer form state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProducerForm {
    draft: ProducerDraft,
}

impl ProducerForm {
    /// Empty form for a new producer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from a stored producer, for editing.
    pub fn from_producer(producer: &Producer) -> Self {
        Self {
            draft: ProducerDraft::from(producer),
        }
    }

    /// Form pre-filled from an existing draft. The identifier is re-masked.
    pub fn from_draft(mut draft: ProducerDraft) -> Self {
        draft.tax_id = format_identifier(&draft.tax_id);
        Self { draft }
    }

    /// Current draft, as displayed.
    pub fn draft(&self) -> &ProducerDraft {
        &self.draft
    }

    // -- producer fields --

    /// Store the identifier as typed, masked to `DDD.DDD.DDD-DD` or
    /// `DD.DDD.DDD/DDDD-DD` once it reaches 11 or 14 digits.
    pub fn set_tax_id(&mut self, raw: &str) {
        self.draft.tax_id = format_identifier(raw);
    }

    /// Identifier as displayed.
    pub fn tax_id(&self) -> &str {
        &self.draft.tax_id
    }

    /// Inline error for the identifier field. `None` while the field is
    /// blank or when the value is valid.
    pub fn tax_id_error(&self) -> Option<ValidationError> {
        if self.draft.tax_id.trim().is_empty() {
            return None;
        }
        check_identifier(&self.draft.tax_id).err()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    // -- farms --

    /// Append an empty farm and return its index.
    pub fn add_farm(&mut self) -> usize {
        self.draft.farms.push(FarmDraft::default());
        self.draft.farms.len() - 1
    }

    /// Remove the farm at `index`. Later farms shift down by one.
    ///
    /// # Errors
    ///
    /// [`RegistryError::IndexOutOfRange`] if there is no such farm.
    pub fn remove_farm(&mut self, index: usize) -> Result<FarmDraft, RegistryError> {
        check_index(FARMS, index, self.draft.farms.len())?;
        Ok(self.draft.farms.remove(index))
    }

    /// The farm at `index`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::IndexOutOfRange`] if there is no such farm.
    pub fn farm(&self, index: usize) -> Result<&FarmDraft, RegistryError> {
        let len = self.draft.farms.len();
        self.draft
            .farms
            .get(index)
            .ok_or(RegistryError::IndexOutOfRange {
                collection: FARMS,
                index,
                len,
            })
    }

    /// Mutable access to the farm at `index`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::IndexOutOfRange`] if there is no such farm.
    pub fn farm_mut(&mut self, index: usize) -> Result<&mut FarmDraft, RegistryError> {
        let len = self.draft.farms.len();
        self.draft
            .farms
            .get_mut(index)
            .ok_or(RegistryError::IndexOutOfRange {
                collection: FARMS,
                index,
                len,
            })
    }

    /// Set one area figure of the farm at `index`.
    ///
    /// Returns the area-sum issue the farm now has, if any, so the caller
    /// can surface it right away. The issue severity follows
    /// `config.area_policy`; nothing is blocked here.
    ///
    /// # Errors
    ///
    /// [`RegistryError::IndexOutOfRange`] if there is no such farm.
    pub fn set_area(
        &mut self,
        index: usize,
        field: AreaField,
        value: f64,
        config: &RegistryConfig,
    ) -> Result<Option<Issue>, RegistryError> {
        let farm = self.farm_mut(index)?;
        farm.areas.set(field, value);

        let areas = farm.areas;
        if !config.checks_area_sum(&areas) {
            return Ok(None);
        }
        Ok(areas.check().err().map(|error| {
            let issue = Issue::new(FieldPath::Farm { index }, config.area_policy.severity(), error);
            tracing::warn!(path = %issue.path, error = %issue.error, "farm areas exceed total");
            issue
        }))
    }

    // -- crops --

    /// Append an empty crop to the farm at `farm` and return its index.
    ///
    /// # Errors
    ///
    /// [`RegistryError::IndexOutOfRange`] if there is no such farm.
    pub fn add_crop(&mut self, farm: usize) -> Result<usize, RegistryError> {
        let crops = &mut self.farm_mut(farm)?.crops;
        crops.push(CropDraft::default());
        Ok(crops.len() - 1)
    }

    /// Remove crop `index` from the farm at `farm`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::IndexOutOfRange`] if either index is out of range.
    pub fn remove_crop(&mut self, farm: usize, index: usize) -> Result<CropDraft, RegistryError> {
        let crops = &mut self.farm_mut(farm)?.crops;
        check_index(CROPS, index, crops.len())?;
        Ok(crops.remove(index))
    }

    /// Mutable access to crop `index` of the farm at `farm`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::IndexOutOfRange`] if either index is out of range.
    pub fn crop_mut(&mut self, farm: usize, index: usize) -> Result<&mut CropDraft, RegistryError> {
        let crops = &mut self.farm_mut(farm)?.crops;
        let len = crops.len();
        crops.get_mut(index).ok_or(RegistryError::IndexOutOfRange {
            collection: CROPS,
            index,
            len,
        })
    }

    // -- review & submit --

    /// Review the current draft.
    pub fn review(&self, config: &RegistryConfig) -> Review {
        review_producer(&self.draft, config)
    }

    /// Produce the draft to send to the registry.
    ///
    /// Warnings are logged and let through. The returned draft carries the
    /// identifier as bare digits.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Rejected`] with every error-severity issue, including
    /// a missing identifier.
    pub fn submit(&self, config: &RegistryConfig) -> Result<ProducerDraft, RegistryError> {
        let mut review = self.review(config);
        if self.draft.tax_id.trim().is_empty() {
            review.push(Issue::new(
                FieldPath::TaxId,
                Severity::Error,
                ValidationError::UnrecognizedLength { digits: 0 },
            ));
        }

        if review.is_blocking() {
            let errors = review.into_errors();
            tracing::warn!(errors = errors.len(), "producer submission blocked");
            return Err(RegistryError::Rejected(errors));
        }

        let warnings = review.warnings().count();
        let mut draft = self.draft.clone();
        draft.tax_id = normalize(&draft.tax_id);
        tracing::info!(
            farms = draft.farms.len(),
            warnings,
            "producer draft ready for submission"
        );
        Ok(draft)
    }
}

fn check_index(collection: &'static str, index: usize, len: usize) -> Result<(), RegistryError> {
    if index < len {
        Ok(())
    } else {
        Err(RegistryError::IndexOutOfRange {
            collection,
            index,
            len,
        })
    }
}
