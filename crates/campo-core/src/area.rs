//! # Farm Land Areas
//!
//! A farm declares three figures in hectares: the total area, the
//! agricultural (arable) area and the vegetation (legal reserve) area. The
//! two sub-areas must fit inside the total:
//!
//! ```text
//! agricultural + vegetation <= total
//! ```
//!
//! Equality is allowed and there is no requirement that the sub-areas
//! cover the whole farm. [`areas_consistent`] is the bare predicate;
//! [`AreaTriple`] bundles the three figures with the record-level rules.
//!
//! The check is advisory at this layer. Whether a failure blocks a
//! submission is decided by the caller.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// True iff `agricultural + vegetation <= total`.
///
/// Pure arithmetic: negative values are not rejected, and any NaN makes
/// the comparison false.
pub fn areas_consistent(total: f64, agricultural: f64, vegetation: f64) -> bool {
    agricultural + vegetation <= total
}

/// Names one of the three area figures. Displays as the wire field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaField {
    /// `area_total`
    Total,
    /// `area_agricultavel`
    Agricultural,
    /// `area_vegetacao`
    Vegetation,
}

impl AreaField {
    /// All three fields, in declaration order.
    pub const ALL: [AreaField; 3] = [Self::Total, Self::Agricultural, Self::Vegetation];

    /// Field name used by the registry API.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Total => "area_total",
            Self::Agricultural => "area_agricultavel",
            Self::Vegetation => "area_vegetacao",
        }
    }
}

impl std::fmt::Display for AreaField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// The three area figures of a farm, in hectares.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AreaTriple {
    /// Total farm area.
    #[serde(rename = "area_total")]
    pub total: f64,
    /// Arable area.
    #[serde(rename = "area_agricultavel")]
    pub agricultural: f64,
    /// Vegetation / legal reserve area.
    #[serde(rename = "area_vegetacao")]
    pub vegetation: f64,
}

impl AreaTriple {
    /// Bundle three figures.
    pub fn new(total: f64, agricultural: f64, vegetation: f64) -> Self {
        Self {
            total,
            agricultural,
            vegetation,
        }
    }

    /// Read one figure by name.
    pub fn get(&self, field: AreaField) -> f64 {
        match field {
            AreaField::Total => self.total,
            AreaField::Agricultural => self.agricultural,
            AreaField::Vegetation => self.vegetation,
        }
    }

    /// Overwrite one figure by name.
    pub fn set(&mut self, field: AreaField, value: f64) {
        match field {
            AreaField::Total => self.total = value,
            AreaField::Agricultural => self.agricultural = value,
            AreaField::Vegetation => self.vegetation = value,
        }
    }

    /// Same as [`areas_consistent`] on these figures.
    pub fn is_consistent(&self) -> bool {
        areas_consistent(self.total, self.agricultural, self.vegetation)
    }

    /// True when no figure is zero. Callers only run the sum check once
    /// the user has filled in all three fields.
    pub fn is_filled(&self) -> bool {
        AreaField::ALL.iter().all(|&f| self.get(f) != 0.0)
    }

    /// Agricultural plus vegetation area.
    pub fn allocated(&self) -> f64 {
        self.agricultural + self.vegetation
    }

    /// Area not declared as agricultural or vegetation. Negative when the
    /// triple is inconsistent.
    pub fn unallocated(&self) -> f64 {
        self.total - self.allocated()
    }

    /// Check the sum invariant.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AreaSumExceedsTotal`] when
    /// `agricultural + vegetation > total`.
    pub fn check(&self) -> Result<(), ValidationError> {
        if self.is_consistent() {
            return Ok(());
        }
        Err(ValidationError::AreaSumExceedsTotal {
            total: self.total,
            agricultural: self.agricultural,
            vegetation: self.vegetation,
        })
    }

    /// Check that every figure is finite and strictly positive, in
    /// declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonFiniteArea`] or
    /// [`ValidationError::NonPositiveArea`] for the first offending field.
    pub fn check_positive(&self) -> Result<(), ValidationError> {
        for field in AreaField::ALL {
            let value = self.get(field);
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteArea { field });
            }
            if value <= 0.0 {
                return Err(ValidationError::NonPositiveArea { field, value });
            }
        }
        Ok(())
    }
}
