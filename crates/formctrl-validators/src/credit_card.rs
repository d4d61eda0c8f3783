//! Credit card number validator

use crate::errors::{ValidationError, ValidationResult};
use crate::Validator;

/// Credit card number.
///
/// A number is valid when it passes both [`CreditCard::validate_digit`] and
/// [`CreditCard::validate_modulo`].
///
/// # Examples
///
/// ```
/// use formctrl_validators::{CreditCard, Validator};
///
/// assert!(CreditCard.is_valid("4111 1111 1111 1111"));
/// assert!(!CreditCard.is_valid("4111 1111 1111 1112"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CreditCard;

impl CreditCard {
	/// Checks the digit pattern: 13 to 19 digits once spaces and dashes are removed.
	pub fn validate_digit(value: &str) -> bool {
		let compact: String = value
			.trim()
			.chars()
			.filter(|c| *c != ' ' && *c != '-')
			.collect();
		(13..=19).contains(&compact.len()) && compact.chars().all(|c| c.is_ascii_digit())
	}

	/// Checks the Luhn (modulo 10) checksum over the digits of `value`.
	pub fn validate_modulo(value: &str) -> bool {
		let numbers: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();
		if numbers.is_empty() {
			return false;
		}

		let sum: u32 = numbers
			.iter()
			.rev()
			.enumerate()
			.map(|(i, &d)| {
				if i % 2 == 1 {
					let doubled = d * 2;
					if doubled > 9 { doubled - 9 } else { doubled }
				} else {
					d
				}
			})
			.sum();

		sum % 10 == 0
	}
}

impl Validator for CreditCard {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		if !Self::validate_digit(value) {
			return Err(ValidationError::Format("credit card"));
		}
		if !Self::validate_modulo(value) {
			return Err(ValidationError::Luhn);
		}
		Ok(())
	}
}
