//! Digit extraction, zero padding and progressive masks

use crate::errors::{ValidationError, ValidationResult};

/// Keeps only the ASCII digits of `value`.
///
/// # Examples
///
/// ```
/// use formctrl_validators::digits;
///
/// assert_eq!(digits("123.456.789-00"), "12345678900");
/// assert_eq!(digits("XXX.XXX.XXX-XX"), "");
/// ```
pub fn digits(value: &str) -> String {
	value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Reduces `value` to exactly `length` digits.
///
/// Blank input and input without digits are rejected. Shorter digit strings
/// are padded with leading zeros, longer ones are rejected. A `length` of zero
/// disables the length handling.
///
/// # Examples
///
/// ```
/// use formctrl_validators::sanitize;
///
/// assert_eq!(sanitize("123.456", 8).unwrap(), "00123456");
/// assert!(sanitize("   ", 8).is_err());
/// assert!(sanitize("123456789", 8).is_err());
/// ```
pub fn sanitize(value: &str, length: usize) -> ValidationResult<String> {
	let value = value.trim();
	if value.is_empty() {
		return Err(ValidationError::Empty);
	}

	let mut only_digits = digits(value);
	if only_digits.is_empty() {
		return Err(ValidationError::Empty);
	}

	if length > 0 {
		if only_digits.len() > length {
			return Err(ValidationError::TooManyDigits {
				max: length,
				actual: only_digits.len(),
			});
		}
		if only_digits.len() < length {
			only_digits = format!("{}{}", "0".repeat(length - only_digits.len()), only_digits);
		}
	}

	Ok(only_digits)
}

/// Lays `digits` over `pattern`, where every `0` in the pattern is a digit slot.
///
/// The mask is progressive: literal separators are only emitted while there
/// are digits left to place after them, so partially typed values stay clean.
/// Digits beyond the last slot are dropped.
///
/// # Examples
///
/// ```
/// use formctrl_validators::apply_mask;
///
/// assert_eq!(apply_mask("12345678", "00000-000"), "12345-678");
/// assert_eq!(apply_mask("123456", "00000-000"), "12345-6");
/// assert_eq!(apply_mask("12345", "00000-000"), "12345");
/// ```
pub fn apply_mask(digits: &str, pattern: &str) -> String {
	let mut masked = String::with_capacity(pattern.len());
	let mut remaining = digits.chars().peekable();

	for slot in pattern.chars() {
		if remaining.peek().is_none() {
			break;
		}
		if slot == '0' {
			if let Some(digit) = remaining.next() {
				masked.push(digit);
			}
		} else {
			masked.push(slot);
		}
	}

	masked
}

/// Strips `value` to at most `max` digits and masks it with `pattern`.
pub(crate) fn mask_digits(value: &str, max: usize, pattern: &str) -> String {
	let only_digits: String = digits(value).chars().take(max).collect();
	apply_mask(&only_digits, pattern)
}

/// Weighted modulo-11 check digit used by the Brazilian documents.
///
/// Remainders that would yield 10 or 11 map to zero.
pub(crate) fn modulo_11(digits: &[u32], weights: &[u32]) -> u32 {
	let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
	let remainder = sum % 11;
	if remainder < 2 { 0 } else { 11 - remainder }
}

/// Parses a digit-only string into its numeric digits.
pub(crate) fn to_digit_vec(value: &str) -> Vec<u32> {
	value.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// True when every digit in `value` is the same one.
pub(crate) fn all_same(value: &str) -> bool {
	let mut chars = value.chars();
	match chars.next() {
		Some(first) => chars.all(|c| c == first),
		None => true,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;

	#[rstest]
	#[case("", 11)]
	#[case("   ", 11)]
	#[case("abc", 11)]
	fn test_sanitize_rejects_blank(#[case] value: &str, #[case] length: usize) {
		assert_eq!(sanitize(value, length), Err(ValidationError::Empty));
	}

	#[rstest]
	fn test_sanitize_pads_and_limits() {
		assert_eq!(sanitize("1", 3).unwrap(), "001");
		assert_eq!(sanitize("1-2-3", 3).unwrap(), "123");
		assert_eq!(
			sanitize("1234", 3),
			Err(ValidationError::TooManyDigits { max: 3, actual: 4 })
		);
		assert_eq!(sanitize("98765", 0).unwrap(), "98765");
	}

	#[rstest]
	fn test_apply_mask_drops_overflow() {
		assert_eq!(apply_mask("1234567890", "00-00"), "12-34");
		assert_eq!(apply_mask("", "00-00"), "");
	}

	#[rstest]
	fn test_modulo_11_low_remainders_map_to_zero() {
		// 11 * 1 = 11, remainder 0
		assert_eq!(modulo_11(&[1], &[11]), 0);
		// remainder 1
		assert_eq!(modulo_11(&[1], &[12]), 0);
		// remainder 9
		assert_eq!(modulo_11(&[1], &[9]), 2);
	}

	proptest! {
		#[test]
		fn prop_mask_digits_is_idempotent(input in ".{0,24}") {
			let once = mask_digits(&input, 11, "000.000.000-00");
			let twice = mask_digits(&once, 11, "000.000.000-00");
			prop_assert_eq!(once, twice);
		}
	}
}
