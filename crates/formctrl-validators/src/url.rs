//! URL syntax validator

use crate::errors::{ValidationError, ValidationResult};
use crate::Validator;
use regex::Regex;
use std::sync::LazyLock;

// HTTP/HTTPS URL pattern.
//
// - http or https scheme only
// - Domain labels without leading/trailing hyphens
// - Optional port number (1-5 digits)
// - Optional path, query string, and fragment
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^https?://[a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9\-]*[a-zA-Z0-9])?)*(:[0-9]{1,5})?(/[^\s?#]*)?(\?[^\s#]*)?(#[^\s]*)?$",
	)
	.expect("URL_REGEX: invalid regex pattern")
});

/// HTTP or HTTPS URL.
///
/// # Examples
///
/// ```
/// use formctrl_validators::{Url, Validator};
///
/// assert!(Url.is_valid("https://example.com/path?q=1"));
/// assert!(!Url.is_valid("ftp://example.com"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Url;

impl Validator for Url {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		if URL_REGEX.is_match(value.trim()) {
			Ok(())
		} else {
			Err(ValidationError::Format("url"))
		}
	}
}
