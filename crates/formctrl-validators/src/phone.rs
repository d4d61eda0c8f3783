//! Brazilian phone number filter

use crate::Filter;
use crate::mask::{apply_mask, digits};

const MAX_DIGITS: usize = 11;
const LANDLINE: &str = "(00) 0000-0000";
const MOBILE: &str = "(00) 00000-0000";

/// Phone number with area code.
///
/// Up to ten digits are masked as a landline, eleven as a mobile number.
///
/// # Examples
///
/// ```
/// use formctrl_validators::{Filter, Phone};
///
/// assert_eq!(Phone.filter("1133334444"), "(11) 3333-4444");
/// assert_eq!(Phone.filter("11999998888"), "(11) 99999-8888");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Phone;

impl Filter for Phone {
	fn filter(&self, value: &str) -> String {
		let only_digits: String = digits(value).chars().take(MAX_DIGITS).collect();
		let pattern = if only_digits.len() < MAX_DIGITS {
			LANDLINE
		} else {
			MOBILE
		};
		apply_mask(&only_digits, pattern)
	}
}
