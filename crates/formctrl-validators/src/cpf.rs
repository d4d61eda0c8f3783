//! CPF (Brazilian natural person registry) filter and validator

use crate::errors::{ValidationError, ValidationResult};
use crate::mask::{all_same, apply_mask, mask_digits, modulo_11, sanitize, to_digit_vec};
use crate::{Filter, Validator};

const LENGTH: usize = 11;
const PATTERN: &str = "000.000.000-00";

/// CPF number: 11 digits, the last two being modulo-11 check digits.
///
/// # Examples
///
/// ```
/// use formctrl_validators::{Cpf, Filter, Validator};
///
/// assert_eq!(Cpf.filter("529982"), "529.982");
/// assert!(Cpf.is_valid("52998224725"));
/// assert_eq!(Cpf::format("52998224725").as_deref(), Some("529.982.247-25"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Cpf;

impl Cpf {
	/// Returns the fully masked number, or `None` when it can't be reduced to 11 digits.
	pub fn format(value: &str) -> Option<String> {
		sanitize(value, LENGTH)
			.ok()
			.map(|digits| apply_mask(&digits, PATTERN))
	}
}

impl Filter for Cpf {
	fn filter(&self, value: &str) -> String {
		mask_digits(value, LENGTH, PATTERN)
	}
}

impl Validator for Cpf {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		let cpf = sanitize(value, LENGTH)?;
		if all_same(&cpf) {
			return Err(ValidationError::RepeatedDigits);
		}

		let numbers = to_digit_vec(&cpf);
		let first = modulo_11(&numbers[..9], &[10, 9, 8, 7, 6, 5, 4, 3, 2]);
		if numbers[9] != first {
			return Err(ValidationError::CheckDigit);
		}

		let second = modulo_11(&numbers[..10], &[11, 10, 9, 8, 7, 6, 5, 4, 3, 2]);
		if numbers[10] != second {
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
	#[case("529.982.247-25")]
	#[case("52998224725")]
	#[case(" 529 982 247 25 ")]
	fn test_cpf_valid(#[case] value: &str) {
		assert!(Cpf.validate(value).is_ok());
	}

	#[rstest]
	#[case("529.982.247-26", ValidationError::CheckDigit)]
	#[case("529.982.247-15", ValidationError::CheckDigit)]
	#[case("111.111.111-11", ValidationError::RepeatedDigits)]
	#[case("", ValidationError::Empty)]
	#[case("XXX.XXX.XXX-XX", ValidationError::Empty)]
	fn test_cpf_invalid(#[case] value: &str, #[case] expected: ValidationError) {
		assert_eq!(Cpf.validate(value), Err(expected));
	}

	#[rstest]
	fn test_cpf_rejects_too_many_digits() {
		assert!(matches!(
			Cpf.validate("529982247251"),
			Err(ValidationError::TooManyDigits { max: 11, actual: 12 })
		));
	}

	#[rstest]
	#[case("", "")]
	#[case("529", "529")]
	#[case("5299", "529.9")]
	#[case("5299822472599", "529.982.247-25")]
	#[case("529.982.247-25", "529.982.247-25")]
	fn test_cpf_filter(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(Cpf.filter(input), expected);
	}

	#[rstest]
	fn test_cpf_format_pads_short_numbers() {
		assert_eq!(Cpf::format("1").as_deref(), Some("000.000.000-01"));
		assert_eq!(Cpf::format(""), None);
	}
}
