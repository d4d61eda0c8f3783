//! PIS/PASEP (Brazilian social integration program) filter and validator

use crate::errors::{ValidationError, ValidationResult};
use crate::mask::{all_same, apply_mask, mask_digits, modulo_11, sanitize, to_digit_vec};
use crate::{Filter, Validator};

const LENGTH: usize = 11;
const PATTERN: &str = "000.00000.00-0";
const WEIGHTS: [u32; 10] = [3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// PIS/PASEP number: 11 digits, the last one being a modulo-11 check digit.
///
/// # Examples
///
/// ```
/// use formctrl_validators::{Filter, Pis, Validator};
///
/// assert_eq!(Pis.filter("12054485570"), "120.54485.57-0");
/// assert!(Pis.is_valid("120.54485.57-0"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Pis;

impl Pis {
	/// Returns the fully masked number, or `None` when it can't be reduced to 11 digits.
	pub fn format(value: &str) -> Option<String> {
		sanitize(value, LENGTH)
			.ok()
			.map(|digits| apply_mask(&digits, PATTERN))
	}
}

impl Filter for Pis {
	fn filter(&self, value: &str) -> String {
		mask_digits(value, LENGTH, PATTERN)
	}
}

impl Validator for Pis {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		let pis = sanitize(value, LENGTH)?;
		if all_same(&pis) {
			return Err(ValidationError::RepeatedDigits);
		}

		let numbers = to_digit_vec(&pis);
		if numbers[10] != modulo_11(&numbers[..10], &WEIGHTS) {
			return Err(ValidationError::CheckDigit);
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_pis_valid() {
		assert!(Pis.validate("120.54485.57-0").is_ok());
		assert!(Pis.validate("12054485570").is_ok());
	}

	#[rstest]
	#[case("120.54485.57-1", ValidationError::CheckDigit)]
	#[case("222.22222.22-2", ValidationError::RepeatedDigits)]
	#[case("", ValidationError::Empty)]
	fn test_pis_invalid(#[case] value: &str, #[case] expected: ValidationError) {
		assert_eq!(Pis.validate(value), Err(expected));
	}

	#[rstest]
	fn test_pis_filter_and_format() {
		assert_eq!(Pis.filter("1205"), "120.5");
		assert_eq!(Pis.filter("120.54485.57-0"), "120.54485.57-0");
		assert_eq!(Pis::format("12054485570").as_deref(), Some("120.54485.57-0"));
	}
}
