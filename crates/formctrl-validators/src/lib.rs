//! Format filters and validators for form controls
//!
//! This crate provides the per-format routines that form controls delegate to:
//! - **Filters** normalize a raw input into its display form (strip to digits,
//!   apply a progressive mask) and are applied on every value write
//! - **Validators** decide whether a value is well formed (check digits,
//!   calendar validity, address syntax)
//!
//! # Supported formats
//!
//! | Format | Filter | Validator |
//! |--------|--------|-----------|
//! | [`Cep`] | `00000-000` | - |
//! | [`Phone`] | `(00) 0000-0000` / `(00) 00000-0000` | - |
//! | [`Cpf`] | `000.000.000-00` | modulo 11 |
//! | [`Cnpj`] | `00.000.000/0000-00` | modulo 11 |
//! | [`Pis`] | `000.00000.00-0` | modulo 11 |
//! | [`DateString`] | `00/00/0000` | calendar date |
//! | [`Email`] | - | address syntax |
//! | [`Url`] | - | http/https URL |
//! | [`CreditCard`] | - | digit pattern + Luhn |
//!
//! # Examples
//!
//! ```
//! use formctrl_validators::{Cpf, Filter, Validator};
//!
//! assert_eq!(Cpf.filter("52998224725"), "529.982.247-25");
//! assert!(Cpf.validate("529.982.247-25").is_ok());
//! assert!(!Cpf.is_valid("529.982.247-26"));
//! ```

pub mod cep;
pub mod cnpj;
pub mod cpf;
pub mod credit_card;
pub mod date;
pub mod email;
pub mod errors;
pub mod mask;
pub mod phone;
pub mod pis;
pub mod url;

pub use cep::Cep;
pub use cnpj::Cnpj;
pub use cpf::Cpf;
pub use credit_card::CreditCard;
pub use date::DateString;
pub use email::Email;
pub use errors::{ValidationError, ValidationResult};
pub use mask::{apply_mask, digits, sanitize};
pub use phone::Phone;
pub use pis::Pis;
pub use url::Url;

/// Transforms a raw input into its normalized display form.
///
/// Filters must be idempotent: filtering an already filtered value returns it
/// unchanged.
pub trait Filter {
	fn filter(&self, value: &str) -> String;
}

/// Decides whether a value is well formed for a given format.
pub trait Validator {
	fn validate(&self, value: &str) -> ValidationResult<()>;

	/// Boolean form of [`Validator::validate`].
	fn is_valid(&self, value: &str) -> bool {
		self.validate(value).is_ok()
	}
}
