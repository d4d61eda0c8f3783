//! `DD/MM/YYYY` date string filter and validator

use crate::errors::{ValidationError, ValidationResult};
use crate::mask::mask_digits;
use crate::{Filter, Validator};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

const PATTERN: &str = "00/00/0000";

// Two-digit day and month, four-digit year. chrono alone would accept
// unpadded fields.
static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("DATE_REGEX: invalid regex pattern")
});

/// Date written as `DD/MM/YYYY`.
///
/// # Examples
///
/// ```
/// use formctrl_validators::{DateString, Filter, Validator};
///
/// assert_eq!(DateString.filter("29022020"), "29/02/2020");
/// assert!(DateString.is_valid("29/02/2020"));
/// assert!(!DateString.is_valid("29/02/2021"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DateString;

impl DateString {
	/// Parses a valid date string into a calendar date.
	pub fn parse(value: &str) -> ValidationResult<NaiveDate> {
		let value = value.trim();
		if !DATE_REGEX.is_match(value) {
			return Err(ValidationError::Format("date"));
		}
		NaiveDate::parse_from_str(value, "%d/%m/%Y")
			.map_err(|e| ValidationError::Calendar(format!("{value}: {e}")))
	}
}

impl Filter for DateString {
	fn filter(&self, value: &str) -> String {
		mask_digits(value, 8, PATTERN)
	}
}

impl Validator for DateString {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		Self::parse(value).map(|_| ())
	}
}
