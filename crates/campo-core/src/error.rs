//! # Error Types — Validation Failures
//!
//! One variant per rule the engine enforces. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Identifier errors carry the [`IdentifierKind`] that was being checked
//!   and, for check digits, the position plus expected and actual values.
//! - Area errors carry the offending figures so a caller can render a
//!   message without re-reading the record.
//! - Raw user input is never embedded in an error. Identifiers are personal
//!   data and errors end up in logs.

use thiserror::Error;

use crate::area::AreaField;
use crate::identifier::IdentifierKind;

/// A rule violated by an identifier or an area triple.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The normalized input is neither 11 (CPF) nor 14 (CNPJ) digits long.
    #[error("CPF must have 11 digits or CNPJ must have 14 digits, got {digits}")]
    UnrecognizedLength {
        /// Number of digits left after normalization.
        digits: usize,
    },

    /// A kind-specific check received the wrong number of digits.
    #[error("{kind} must have {expected} digits, got {actual}")]
    WrongLength {
        /// Kind the caller asked for.
        kind: IdentifierKind,
        /// Digit count required by that kind.
        expected: usize,
        /// Digit count after normalization.
        actual: usize,
    },

    /// Every digit is the same (e.g. `111.111.111-11`).
    #[error("invalid {kind}: all digits are identical")]
    RepeatedDigits {
        /// Kind being checked.
        kind: IdentifierKind,
    },

    /// A check digit does not match the value computed from the digits before it.
    #[error("invalid {kind}: check digit at position {position} is {actual}, expected {expected}")]
    CheckDigitMismatch {
        /// Kind being checked.
        kind: IdentifierKind,
        /// Zero-based index of the check digit in the normalized sequence.
        position: usize,
        /// Digit computed by the modulo-11 rule.
        expected: u8,
        /// Digit present in the input.
        actual: u8,
    },

    /// `agricultural + vegetation` is larger than `total`.
    #[error("agricultural area ({agricultural}) plus vegetation area ({vegetation}) exceeds total area ({total})")]
    AreaSumExceedsTotal {
        /// Total farm area in hectares.
        total: f64,
        /// Agricultural area in hectares.
        agricultural: f64,
        /// Vegetation (reserve) area in hectares.
        vegetation: f64,
    },

    /// An area figure is zero or negative.
    #[error("{field} must be greater than zero, got {value}")]
    NonPositiveArea {
        /// Which figure.
        field: AreaField,
        /// The rejected value.
        value: f64,
    },

    /// An area figure is NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFiniteArea {
        /// Which figure.
        field: AreaField,
    },
}

impl ValidationError {
    /// True for the identifier-related variants.
    pub fn is_identifier_error(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedLength { .. }
                | Self::WrongLength { .. }
                | Self::RepeatedDigits { .. }
                | Self::CheckDigitMismatch { .. }
        )
    }
}
