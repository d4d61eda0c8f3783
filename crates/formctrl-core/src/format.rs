//! Type-keyed value filters and format predicates
//!
//! Every write to a control value runs through [`FormatProvider::filter`], and
//! the format rules of the validation chain ask [`FormatProvider::validate`].
//! [`StandardFormats`] binds the control types to `formctrl-validators`; a
//! custom provider can be attached per control with
//! [`CtrlProps::with_formats`](crate::CtrlProps::with_formats).

use crate::types::CtrlType;
use formctrl_validators::{self as validators, Filter, Validator};
use serde_json::Value;

/// Per-type filter and format predicate used by a control.
pub trait FormatProvider: Send + Sync {
	/// Normalizes a value before it is stored. Types without a filter return
	/// the value unchanged.
	fn filter(&self, ctrl_type: CtrlType, value: Value) -> Value;

	/// Whether a present value is well formed for `ctrl_type`. Types without a
	/// format check accept everything.
	fn validate(&self, ctrl_type: CtrlType, value: &Value) -> bool;
}

/// Default provider backed by `formctrl-validators`.
///
/// # Examples
///
/// ```
/// use formctrl_core::{CtrlType, FormatProvider, StandardFormats};
/// use serde_json::json;
///
/// let formats = StandardFormats;
/// assert_eq!(formats.filter(CtrlType::Cep, json!("01310100")), json!("01310-100"));
/// assert!(formats.validate(CtrlType::Cpf, &json!("529.982.247-25")));
/// assert_eq!(formats.filter(CtrlType::Email, json!("A@B.com")), json!("A@B.com"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFormats;

impl StandardFormats {
	fn filter_for(ctrl_type: CtrlType) -> Option<&'static dyn Filter> {
		match ctrl_type {
			CtrlType::Cep => Some(&validators::Cep),
			CtrlType::Phone => Some(&validators::Phone),
			CtrlType::Cpf => Some(&validators::Cpf),
			CtrlType::Cnpj => Some(&validators::Cnpj),
			CtrlType::Pis => Some(&validators::Pis),
			CtrlType::Date => Some(&validators::DateString),
			_ => None,
		}
	}

	fn validator_for(ctrl_type: CtrlType) -> Option<&'static dyn Validator> {
		match ctrl_type {
			CtrlType::Date => Some(&validators::DateString),
			CtrlType::Email => Some(&validators::Email),
			CtrlType::Url => Some(&validators::Url),
			CtrlType::Cnpj => Some(&validators::Cnpj),
			CtrlType::Cpf => Some(&validators::Cpf),
			CtrlType::Pis => Some(&validators::Pis),
			CtrlType::CreditCard => Some(&validators::CreditCard),
			_ => None,
		}
	}
}

impl FormatProvider for StandardFormats {
	fn filter(&self, ctrl_type: CtrlType, value: Value) -> Value {
		let Some(filter) = Self::filter_for(ctrl_type) else {
			return value;
		};
		match value {
			Value::String(s) => Value::String(filter.filter(&s)),
			Value::Number(n) => Value::String(filter.filter(&n.to_string())),
			other => other,
		}
	}

	fn validate(&self, ctrl_type: CtrlType, value: &Value) -> bool {
		let Some(validator) = Self::validator_for(ctrl_type) else {
			return true;
		};
		match value {
			Value::String(s) => validator.is_valid(s),
			Value::Number(n) => validator.is_valid(&n.to_string()),
			_ => false,
		}
	}
}
