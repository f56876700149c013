//! # Modulo-11 Check Digits (CPF and CNPJ)
//!
//! Both Brazilian taxpayer identifiers end in two check digits computed the
//! same way: a weighted sum of the preceding digits, reduced modulo 11, with
//! remainders 0 and 1 mapping to `0` and everything else to `11 - r`. They
//! differ only in length and weight tables.
//!
//! | Kind | Digits | Weights for check digit 1 | Weights for check digit 2 |
//! |------|--------|---------------------------|---------------------------|
//! | CPF  | 11 | `10..=2` | `11..=2` |
//! | CNPJ | 14 | `5,4,3,2,9,8,7,6,5,4,3,2` | `6,5,4,3,2,9,8,7,6,5,4,3,2` |
//!
//! ## Repeated digits
//!
//! Sequences made of a single repeated digit (`000.000.000-00`,
//! `11.111.111/1111-11`, ...) are rejected before any arithmetic, even
//! though several of them satisfy both check digits. They are the dummy
//! values users type to get past a form.

use crate::digits::{all_identical, digit_values};
use crate::error::ValidationError;
use crate::identifier::IdentifierKind;

const CPF_FIRST_WEIGHTS: [u32; 9] = [10, 9, 8, 7, 6, 5, 4, 3, 2];
const CPF_SECOND_WEIGHTS: [u32; 10] = [11, 10, 9, 8, 7, 6, 5, 4, 3, 2];

const CNPJ_FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Weight tables for one identifier kind. The first check digit sits right
/// after the digits covered by `first`, the second right after `second`.
struct Scheme {
    kind: IdentifierKind,
    first: &'static [u32],
    second: &'static [u32],
}

const CPF: Scheme = Scheme {
    kind: IdentifierKind::Individual,
    first: &CPF_FIRST_WEIGHTS,
    second: &CPF_SECOND_WEIGHTS,
};

const CNPJ: Scheme = Scheme {
    kind: IdentifierKind::Organization,
    first: &CNPJ_FIRST_WEIGHTS,
    second: &CNPJ_SECOND_WEIGHTS,
};

impl Scheme {
    fn verify(&self, raw: &str) -> Result<(), ValidationError> {
        let digits = digit_values(raw);
        let expected = self.first.len() + 2;
        if digits.len() != expected {
            return Err(ValidationError::WrongLength {
                kind: self.kind,
                expected,
                actual: digits.len(),
            });
        }

        if all_identical(&digits) {
            return Err(ValidationError::RepeatedDigits { kind: self.kind });
        }

        for weights in [self.first, self.second] {
            let position = weights.len();
            let computed = check_digit(&digits[..position], weights);
            if digits[position] != computed {
                return Err(ValidationError::CheckDigitMismatch {
                    kind: self.kind,
                    position,
                    expected: computed,
                    actual: digits[position],
                });
            }
        }

        Ok(())
    }
}

/// Compute one modulo-11 check digit.
///
/// Multiplies `digits` and `weights` position by position, sums the
/// products, and maps the remainder `r = sum % 11` to `0` when `r < 2`,
/// otherwise to `11 - r`. Extra elements in the longer slice are ignored.
///
/// ```
/// use campo_core::check_digit;
/// assert_eq!(check_digit(&[1, 2, 3, 4, 5, 6, 7, 8, 9], &[10, 9, 8, 7, 6, 5, 4, 3, 2]), 0);
/// ```
pub fn check_digit(digits: &[u8], weights: &[u32]) -> u8 {
    // Reduce every term mod 11 so arbitrary weights cannot overflow.
    let sum = digits
        .iter()
        .zip(weights)
        .fold(0u32, |acc, (&d, &w)| (acc + u32::from(d % 11) * (w % 11)) % 11);
    match sum {
        r if r < 2 => 0,
        // r is in 2..=10 so the result is a single digit.
        r => (11 - r) as u8,
    }
}

/// Validate an 11-digit individual taxpayer identifier (CPF), reporting
/// the first rule that fails.
///
/// # Errors
///
/// - [`ValidationError::WrongLength`] if the input does not normalize to 11 digits.
/// - [`ValidationError::RepeatedDigits`] if all 11 digits are equal.
/// - [`ValidationError::CheckDigitMismatch`] for position 9 or 10.
pub fn check_individual(raw: &str) -> Result<(), ValidationError> {
    CPF.verify(raw)
}

/// Validate a 14-digit organization taxpayer identifier (CNPJ), reporting
/// the first rule that fails.
///
/// # Errors
///
/// - [`ValidationError::WrongLength`] if the input does not normalize to 14 digits.
/// - [`ValidationError::RepeatedDigits`] if all 14 digits are equal.
/// - [`ValidationError::CheckDigitMismatch`] for position 12 or 13.
pub fn check_organization(raw: &str) -> Result<(), ValidationError> {
    CNPJ.verify(raw)
}

/// True when `raw` normalizes to a valid CPF.
pub fn validate_individual(raw: &str) -> bool {
    check_individual(raw).is_ok()
}

/// True when `raw` normalizes to a valid CNPJ.
pub fn validate_organization(raw: &str) -> bool {
    check_organization(raw).is_ok()
}
