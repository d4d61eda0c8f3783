//! CNPJ (Brazilian legal entity registry) filter and validator

use crate::errors::{ValidationError, ValidationResult};
use crate::mask::{all_same, apply_mask, mask_digits, modulo_11, sanitize, to_digit_vec};
use crate::{Filter, Validator};

const LENGTH: usize = 14;
const PATTERN: &str = "00.000.000/0000-00";

/// CNPJ number: 14 digits, the last two being modulo-11 check digits.
///
/// # Examples
///
/// ```
/// use formctrl_validators::{Cnpj, Filter, Validator};
///
/// assert_eq!(Cnpj.filter("11222333000181"), "11.222.333/0001-81");
/// assert!(Cnpj.is_valid("11.222.333/0001-81"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Cnpj;

impl Cnpj {
	/// Returns the fully masked number, or `None` when it can't be reduced to 14 digits.
	pub fn format(value: &str) -> Option<String> {
		sanitize(value, LENGTH)
			.ok()
			.map(|digits| apply_mask(&digits, PATTERN))
	}
}

impl Filter for Cnpj {
	fn filter(&self, value: &str) -> String {
		mask_digits(value, LENGTH, PATTERN)
	}
}

impl Validator for Cnpj {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		let cnpj = sanitize(value, LENGTH)?;
		if all_same(&cnpj) {
			return Err(ValidationError::RepeatedDigits);
		}

		let numbers = to_digit_vec(&cnpj);
		let first = modulo_11(&numbers[..12], &[5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2]);
		if numbers[12] != first {
			return Err(ValidationError::CheckDigit);
		}

		let second = modulo_11(&numbers[..13], &[6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2]);
		if numbers[13] != second {
			return Err(ValidationError::CheckDigit);
		}

		Ok(())
	}
}
