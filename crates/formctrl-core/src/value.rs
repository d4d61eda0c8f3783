//! Helpers over the polymorphic control value
//!
//! A control value is a [`serde_json::Value`]: a string for text-like types,
//! a boolean for `Boolean`, a number or numeric string for `Number`, and an
//! array of selected option values for the option-bearing types. The rules
//! rely on a loose notion of "empty" that these helpers make explicit.

use serde_json::Value;

/// Control value, shaped by the control's type.
pub type CtrlValue = Value;

/// Whether a value counts as present.
///
/// `null`, `false`, zero and the empty string are falsy; every array and
/// object is truthy, even when empty.
///
/// # Examples
///
/// ```
/// use formctrl_core::is_truthy;
/// use serde_json::json;
///
/// assert!(!is_truthy(&json!("")));
/// assert!(!is_truthy(&json!(0)));
/// assert!(is_truthy(&json!([])));
/// assert!(is_truthy(&json!("0")));
/// ```
pub fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
		Value::String(s) => !s.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}

/// Length used by the length rules: characters for strings, elements for arrays.
///
/// Other shapes have no length.
pub fn value_length(value: &Value) -> Option<usize> {
	match value {
		Value::String(s) => Some(s.chars().count()),
		Value::Array(items) => Some(items.len()),
		_ => None,
	}
}

/// Textual form of a value, as matched by regex rules.
///
/// Arrays are joined with commas, `null` and objects become empty.
pub fn value_text(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		Value::Number(n) => n.to_string(),
		Value::Bool(b) => b.to_string(),
		Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(","),
		Value::Null | Value::Object(_) => String::new(),
	}
}
