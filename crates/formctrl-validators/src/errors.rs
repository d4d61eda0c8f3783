//! Validation error types

/// Reasons a value is rejected by a [`Validator`](crate::Validator)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
	#[error("Value is empty or has no digits")]
	Empty,
	#[error("Expected at most {max} digits, got {actual}")]
	TooManyDigits { max: usize, actual: usize },
	#[error("All digits are the same")]
	RepeatedDigits,
	#[error("Check digit mismatch")]
	CheckDigit,
	#[error("Invalid {0} format")]
	Format(&'static str),
	#[error("Invalid calendar date: {0}")]
	Calendar(String),
	#[error("Luhn checksum failed")]
	Luhn,
}

pub type ValidationResult<T> = Result<T, ValidationError>;
