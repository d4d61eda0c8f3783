//! E-mail address syntax validator

use crate::errors::{ValidationError, ValidationResult};
use crate::Validator;
use regex::Regex;
use std::sync::LazyLock;

// Word characters separated by single dots or hyphens on both sides of the
// `@`, ending in a 2 to 9 character top-level label.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,9})$")
		.expect("EMAIL_REGEX: invalid regex pattern")
});

/// E-mail address.
///
/// # Examples
///
/// ```
/// use formctrl_validators::{Email, Validator};
///
/// assert!(Email.is_valid("user.name@example.com"));
/// assert!(!Email.is_valid("user@"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl Validator for Email {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		if EMAIL_REGEX.is_match(value.trim()) {
			Ok(())
		} else {
			Err(ValidationError::Format("email"))
		}
	}
}
