//! # Digit Normalization
//!
//! Strips everything that is not an ASCII decimal digit. Users type
//! identifiers with dots, dashes, slashes and spaces; every other routine in
//! this crate works on the normalized form.

/// Keep the characters `0`-`9` of `raw`, in order, and drop the rest.
///
/// Only ASCII digits count. Other Unicode decimal digits (e.g. Arabic-Indic
/// or full-width) are removed like any other punctuation.
///
/// ```
/// assert_eq!(campo_core::normalize("123.456.789-09"), "12345678909");
/// assert_eq!(campo_core::normalize("abc"), "");
/// ```
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Numeric values of the ASCII digits in `raw`.
pub(crate) fn digit_values(raw: &str) -> Vec<u8> {
    raw.bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect()
}

/// True when the sequence is non-empty and every element equals the first.
pub(crate) fn all_identical(digits: &[u8]) -> bool {
    match digits.split_first() {
        Some((first, rest)) => rest.iter().all(|d| d == first),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_whitespace() {
        assert_eq!(normalize("11.222.333/0001-81"), "11222333000181");
        assert_eq!(normalize(" 123 456\t789-09\n"), "12345678909");
    }

    #[test]
    fn empty_and_digitless_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("CPF: n/a"), "");
    }

    #[test]
    fn preserves_order_and_leading_zeros() {
        assert_eq!(normalize("0a0b1"), "001");
    }

    #[test]
    fn non_ascii_digits_are_dropped() {
        // Full-width and Arabic-Indic digits.
        assert_eq!(normalize("１２3٤5"), "35");
    }

    #[test]
    fn digit_values_match_normalize() {
        assert_eq!(digit_values("1.2-3"), vec![1, 2, 3]);
        assert_eq!(digit_values("é9"), vec![9]);
    }

    #[test]
    fn all_identical_rule() {
        assert!(all_identical(&[7; 11]));
        assert!(!all_identical(&[1, 1, 2]));
        assert!(!all_identical(&[]));
    }
}
