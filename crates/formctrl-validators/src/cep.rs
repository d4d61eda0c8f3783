//! CEP (Brazilian postal code) filter

use crate::Filter;
use crate::mask::mask_digits;

/// CEP postal code, masked as `00000-000`.
///
/// # Examples
///
/// ```
/// use formctrl_validators::{Cep, Filter};
///
/// assert_eq!(Cep.filter("01310100"), "01310-100");
/// assert_eq!(Cep.filter("01310-100"), "01310-100");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Cep;

impl Filter for Cep {
	fn filter(&self, value: &str) -> String {
		mask_digits(value, 8, "00000-000")
	}
}
