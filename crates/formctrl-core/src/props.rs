//! Control blueprints and property defaulting
//!
//! [`CtrlProps`] is the declarative description of a control. It can be
//! built in Rust with the builder methods, or loaded as plain data: it
//! deserializes from camelCase JSON where every key except `name` is
//! optional.
//!
//! ```
//! use formctrl_core::{CtrlProps, CtrlType};
//! use serde_json::json;
//!
//! let props = CtrlProps::from_blueprint(json!({
//!     "name": "cpf",
//!     "type": 22,
//!     "required": true,
//!     "placeholder": "XXX.XXX.XXX-XX"
//! }))
//! .unwrap();
//!
//! assert_eq!(props.ctrl_type, CtrlType::Cpf);
//! assert!(props.required);
//! assert_eq!(props.required_message, "");
//! ```

use crate::error::{CtrlError, CtrlResult};
use crate::format::FormatProvider;
use crate::types::{ChangeCallback, ChangeEvent, CtrlOption, CtrlState, CtrlType, Interceptor};
use crate::value::is_truthy;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const REGEX_MESSAGE: &str = "The current value doesn't match the regular expression.";
pub const DATE_MESSAGE: &str = "Invalid date value.";
pub const CNPJ_MESSAGE: &str = "Invalid CNPJ number.";
pub const CPF_MESSAGE: &str = "Invalid CPF number.";
pub const PIS_MESSAGE: &str = "Invalid PIS number.";
pub const CREDIT_CARD_MESSAGE: &str = "Invalid credit card number.";
pub const EMAIL_MESSAGE: &str = "Invalid email address provided.";
pub const URL_MESSAGE: &str = "Invalid URL provided.";

/// Properties of a control before construction.
///
/// Callbacks and the format provider are not part of the plain-data form and
/// are attached with [`with_on_change`](Self::with_on_change),
/// [`with_interceptor`](Self::with_interceptor) and
/// [`with_formats`](Self::with_formats).
#[derive(Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CtrlProps {
	pub name: String,
	/// Alternate key used when serializing with aliases
	pub alias: String,
	pub info_text: String,
	pub description: String,
	pub label: String,
	pub autocomplete: bool,
	pub value: Value,
	pub disabled: bool,
	pub options: Vec<CtrlOption>,
	pub state: CtrlState,
	pub dirty: bool,
	pub placeholder: String,
	#[serde(rename = "type")]
	pub ctrl_type: CtrlType,
	pub custom: bool,
	pub custom_class: Option<String>,
	pub wrap_class: Option<String>,
	#[serde(skip)]
	pub on_change: Option<ChangeCallback>,
	#[serde(skip)]
	pub interceptors: Vec<Interceptor>,
	#[serde(skip)]
	pub formats: Option<Arc<dyn FormatProvider>>,
	pub message: String,
	pub required: bool,
	pub required_message: String,
	pub max_length: Option<usize>,
	pub max_length_message: String,
	pub min_length: Option<usize>,
	pub min_length_message: String,
	pub max_answers: Option<usize>,
	pub max_answers_message: String,
	pub min_answers: Option<usize>,
	pub min_answers_message: String,
	/// Pattern source, compiled when the control is built
	pub regex: Option<String>,
	pub regex_message: String,
	pub date_message: String,
	pub cnpj_message: String,
	pub cpf_message: String,
	pub pis_message: String,
	pub credit_card_message: String,
	pub email_message: String,
	pub url_message: String,
	pub cols: Option<u32>,
	pub rows: Option<u32>,
}

impl Default for CtrlProps {
	fn default() -> Self {
		create_empty_props()
	}
}

impl fmt::Debug for CtrlProps {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CtrlProps")
			.field("name", &self.name)
			.field("ctrl_type", &self.ctrl_type)
			.field("value", &self.value)
			.field("required", &self.required)
			.field("interceptors", &self.interceptors.len())
			.field("on_change", &self.on_change.is_some())
			.finish_non_exhaustive()
	}
}

impl CtrlProps {
	/// Empty properties carrying only a name
	///
	/// # Examples
	///
	/// ```
	/// use formctrl_core::{CtrlProps, CtrlType};
	///
	/// let props = CtrlProps::new("email").with_type(CtrlType::Email).required();
	/// assert_eq!(props.name, "email");
	/// assert!(props.required);
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..create_empty_props()
		}
	}

	/// Reads properties from a plain-data blueprint.
	///
	/// The blueprint must be an object with a non-empty `name`; unknown keys
	/// are ignored.
	pub fn from_blueprint(blueprint: Value) -> CtrlResult<Self> {
		if !validate_ctrl_props(&blueprint) {
			return Err(CtrlError::MissingName);
		}
		serde_json::from_value(blueprint).map_err(|e| CtrlError::InvalidBlueprint(e.to_string()))
	}

	pub fn with_type(mut self, ctrl_type: CtrlType) -> Self {
		self.ctrl_type = ctrl_type;
		self
	}

	pub fn with_value(mut self, value: impl Into<Value>) -> Self {
		self.value = value.into();
		self
	}

	pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
		self.alias = alias.into();
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = label.into();
		self
	}

	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = placeholder.into();
		self
	}

	pub fn with_options(mut self, options: Vec<CtrlOption>) -> Self {
		self.options = options;
		self
	}

	pub fn disabled(mut self) -> Self {
		self.disabled = true;
		self
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn with_required_message(mut self, message: impl Into<String>) -> Self {
		self.required_message = message.into();
		self
	}

	pub fn with_min_length(mut self, min_length: usize) -> Self {
		self.min_length = Some(min_length);
		self
	}

	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	pub fn with_min_answers(mut self, min_answers: usize) -> Self {
		self.min_answers = Some(min_answers);
		self
	}

	pub fn with_max_answers(mut self, max_answers: usize) -> Self {
		self.max_answers = Some(max_answers);
		self
	}

	/// Sets the pattern the value must match
	pub fn with_regex(mut self, pattern: impl Into<String>) -> Self {
		self.regex = Some(pattern.into());
		self
	}

	pub fn with_regex_message(mut self, message: impl Into<String>) -> Self {
		self.regex_message = message.into();
		self
	}

	/// Appends an interceptor; interceptors run in insertion order.
	///
	/// # Examples
	///
	/// ```
	/// use formctrl_core::{Ctrl, CtrlProps};
	/// use serde_json::{Value, json};
	///
	/// let ctrl = Ctrl::new(
	///     CtrlProps::new("code")
	///         .with_value(" abc ")
	///         .with_interceptor(|v: Value| Ok(json!(v.as_str().unwrap_or_default().trim())))
	///         .with_interceptor(|v: Value| Ok(json!(v.as_str().unwrap_or_default().to_uppercase()))),
	/// )
	/// .unwrap();
	///
	/// assert_eq!(ctrl.value(), &json!("ABC"));
	/// ```
	pub fn with_interceptor<F>(mut self, interceptor: F) -> Self
	where
		F: Fn(Value) -> anyhow::Result<Value> + Send + Sync + 'static,
	{
		self.interceptors.push(Arc::new(interceptor));
		self
	}

	/// Replaces the interceptor list
	pub fn with_interceptors(mut self, interceptors: Vec<Interceptor>) -> Self {
		self.interceptors = interceptors;
		self
	}

	pub fn with_on_change<F>(mut self, callback: F) -> Self
	where
		F: Fn(&ChangeEvent<'_>, &Value) + Send + Sync + 'static,
	{
		self.on_change = Some(Arc::new(callback));
		self
	}

	/// Uses a custom filter/predicate provider instead of the standard one
	pub fn with_formats(mut self, formats: Arc<dyn FormatProvider>) -> Self {
		self.formats = Some(formats);
		self
	}
}

/// Properties with neutral defaults: empty strings, `false` flags, no limits,
/// `Normal` state, `Default` type and no options.
pub fn create_empty_props() -> CtrlProps {
	CtrlProps {
		name: String::new(),
		alias: String::new(),
		info_text: String::new(),
		description: String::new(),
		label: String::new(),
		autocomplete: false,
		value: Value::String(String::new()),
		disabled: false,
		options: Vec::new(),
		state: CtrlState::Normal,
		dirty: false,
		placeholder: String::new(),
		ctrl_type: CtrlType::Default,
		custom: false,
		custom_class: None,
		wrap_class: None,
		on_change: None,
		interceptors: Vec::new(),
		formats: None,
		message: String::new(),
		required: false,
		required_message: String::new(),
		max_length: None,
		max_length_message: String::new(),
		min_length: None,
		min_length_message: String::new(),
		max_answers: None,
		max_answers_message: String::new(),
		min_answers: None,
		min_answers_message: String::new(),
		regex: None,
		regex_message: String::new(),
		date_message: String::new(),
		cnpj_message: String::new(),
		cpf_message: String::new(),
		pis_message: String::new(),
		credit_card_message: String::new(),
		email_message: String::new(),
		url_message: String::new(),
		cols: None,
		rows: None,
	}
}

fn fill_blank(message: &mut String, default: impl FnOnce() -> String) {
	if message.trim().is_empty() {
		*message = default();
	}
}

fn active_limit(limit: Option<usize>) -> Option<usize> {
	limit.filter(|n| *n > 0)
}

/// Completes caller properties with default messages and coerces the value
/// to the shape its type expects.
///
/// Rule messages are only generated for active rules (limits quote the limit
/// value); the date, document, email and URL messages are always filled.
///
/// # Examples
///
/// ```
/// use formctrl_core::{CtrlProps, CtrlType, map_default_ctrl_props};
/// use serde_json::json;
///
/// let props = map_default_ctrl_props(
///     CtrlProps::new("qty").with_type(CtrlType::Number).with_value("$1,234.50").with_max_length(5),
/// );
/// assert_eq!(props.value, json!("1,234.50"));
/// assert_eq!(props.max_length_message, "Max length accepted is \"5\" characters.");
/// ```
pub fn map_default_ctrl_props(mut props: CtrlProps) -> CtrlProps {
	if props.required {
		fill_blank(&mut props.required_message, || REQUIRED_MESSAGE.to_string());
	}
	if let Some(max) = active_limit(props.max_length) {
		fill_blank(&mut props.max_length_message, || {
			format!("Max length accepted is \"{max}\" characters.")
		});
	}
	if let Some(min) = active_limit(props.min_length) {
		fill_blank(&mut props.min_length_message, || {
			format!("Min length accepted is \"{min}\" characters.")
		});
	}
	if let Some(max) = active_limit(props.max_answers) {
		fill_blank(&mut props.max_answers_message, || {
			format!("You can't choose more than \"{max}\" options.")
		});
	}
	if let Some(min) = active_limit(props.min_answers) {
		fill_blank(&mut props.min_answers_message, || {
			format!("Please choose at least \"{min}\" options.")
		});
	}
	if props.regex.as_deref().is_some_and(|p| !p.is_empty()) {
		fill_blank(&mut props.regex_message, || REGEX_MESSAGE.to_string());
	}

	fill_blank(&mut props.date_message, || DATE_MESSAGE.to_string());
	fill_blank(&mut props.cnpj_message, || CNPJ_MESSAGE.to_string());
	fill_blank(&mut props.cpf_message, || CPF_MESSAGE.to_string());
	fill_blank(&mut props.pis_message, || PIS_MESSAGE.to_string());
	fill_blank(&mut props.credit_card_message, || {
		CREDIT_CARD_MESSAGE.to_string()
	});
	fill_blank(&mut props.email_message, || EMAIL_MESSAGE.to_string());
	fill_blank(&mut props.url_message, || URL_MESSAGE.to_string());

	props.value = coerce_value(props.ctrl_type, std::mem::take(&mut props.value));
	props
}

/// Coerces a raw value to the shape `ctrl_type` expects.
///
/// - `Boolean`: `true` only for a literal `true`
/// - `Number`: strings keep only digits, `-`, `(`, `)`, `.` and `,`
/// - option-bearing types: arrays are kept, anything else becomes `[]`
/// - everything else: falsy values (including `0` and `false`) become `""`
pub fn coerce_value(ctrl_type: CtrlType, value: Value) -> Value {
	match ctrl_type {
		CtrlType::Boolean => Value::Bool(value == Value::Bool(true)),
		CtrlType::Number => match value {
			Value::String(s) => Value::String(
				s.chars()
					.filter(|c| c.is_ascii_digit() || matches!(c, '-' | '(' | ')' | '.' | ','))
					.collect(),
			),
			other => other,
		},
		t if t.is_option_type() => match value {
			Value::Array(items) => Value::Array(items),
			_ => Value::Array(Vec::new()),
		},
		_ => {
			if is_truthy(&value) {
				value
			} else {
				Value::String(String::new())
			}
		}
	}
}

/// Guard for raw blueprints: an object carrying a non-empty `name`.
///
/// # Examples
///
/// ```
/// use formctrl_core::validate_ctrl_props;
/// use serde_json::json;
///
/// assert!(validate_ctrl_props(&json!({"name": "email"})));
/// assert!(!validate_ctrl_props(&json!({"name": ""})));
/// assert!(!validate_ctrl_props(&json!({"label": "Email"})));
/// assert!(!validate_ctrl_props(&json!("email")));
/// ```
pub fn validate_ctrl_props(props: &Value) -> bool {
	let Some(object) = props.as_object() else {
		return false;
	};
	match object.get("name") {
		None | Some(Value::Null) => false,
		Some(Value::String(name)) => !name.is_empty(),
		Some(_) => true,
	}
}

/// Digits of a string or number value; any other shape yields `""`.
///
/// Document-like values are reduced with this before their length is checked,
/// so mask punctuation does not count toward the limits.
///
/// # Examples
///
/// ```
/// use formctrl_core::to_numeric_string;
/// use serde_json::json;
///
/// assert_eq!(to_numeric_string(&json!("123.456.789-00")), "12345678900");
/// assert_eq!(to_numeric_string(&json!("XXX.XXX.XXX-XX")), "");
/// assert_eq!(to_numeric_string(&json!(true)), "");
/// ```
pub fn to_numeric_string(value: &Value) -> String {
	match value {
		Value::String(s) => formctrl_validators::digits(s.trim()),
		Value::Number(n) => formctrl_validators::digits(&n.to_string()),
		_ => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_create_empty_props() {
		let props = create_empty_props();
		assert_eq!(props.name, "");
		assert_eq!(props.value, json!(""));
		assert_eq!(props.state, CtrlState::Normal);
		assert_eq!(props.ctrl_type, CtrlType::Default);
		assert!(props.options.is_empty());
		assert!(props.max_length.is_none());
		assert!(props.interceptors.is_empty());
	}

	#[rstest]
	fn test_required_message_defaults_only_when_required() {
		let optional = map_default_ctrl_props(CtrlProps::new("a"));
		let required = map_default_ctrl_props(CtrlProps::new("a").required());
		let custom = map_default_ctrl_props(
			CtrlProps::new("a")
				.required()
				.with_required_message("Fill me"),
		);

		assert_eq!(optional.required_message, "");
		assert_eq!(required.required_message, REQUIRED_MESSAGE);
		assert_eq!(custom.required_message, "Fill me");
	}

	#[rstest]
	fn test_limit_messages_quote_the_limit() {
		let props = map_default_ctrl_props(
			CtrlProps::new("a")
				.with_min_length(2)
				.with_max_length(5)
				.with_min_answers(1)
				.with_max_answers(3)
				.with_regex("^a"),
		);

		assert_eq!(props.min_length_message, "Min length accepted is \"2\" characters.");
		assert_eq!(props.max_length_message, "Max length accepted is \"5\" characters.");
		assert_eq!(props.min_answers_message, "Please choose at least \"1\" options.");
		assert_eq!(props.max_answers_message, "You can't choose more than \"3\" options.");
		assert_eq!(props.regex_message, REGEX_MESSAGE);
	}

	#[rstest]
	fn test_inactive_limits_keep_blank_messages() {
		let props = map_default_ctrl_props(CtrlProps::new("a").with_max_length(0));
		assert_eq!(props.max_length_message, "");
		assert_eq!(props.min_length_message, "");
		assert_eq!(props.regex_message, "");
	}

	#[rstest]
	fn test_format_messages_always_filled() {
		let props = map_default_ctrl_props(CtrlProps::new("a"));
		assert_eq!(props.date_message, DATE_MESSAGE);
		assert_eq!(props.cnpj_message, CNPJ_MESSAGE);
		assert_eq!(props.cpf_message, CPF_MESSAGE);
		assert_eq!(props.pis_message, PIS_MESSAGE);
		assert_eq!(props.credit_card_message, CREDIT_CARD_MESSAGE);
		assert_eq!(props.email_message, EMAIL_MESSAGE);
		assert_eq!(props.url_message, URL_MESSAGE);
	}

	#[rstest]
	fn test_whitespace_message_counts_as_blank() {
		let props = CtrlProps {
			email_message: "   ".to_string(),
			..CtrlProps::new("a")
		};
		assert_eq!(map_default_ctrl_props(props).email_message, EMAIL_MESSAGE);
	}

	#[rstest]
	#[case(CtrlType::Boolean, json!(true), json!(true))]
	#[case(CtrlType::Boolean, json!("true"), json!(false))]
	#[case(CtrlType::Boolean, json!(1), json!(false))]
	#[case(CtrlType::Number, json!("$1,234.50"), json!("1,234.50"))]
	#[case(CtrlType::Number, json!("(-12) abc"), json!("(-12)"))]
	#[case(CtrlType::Number, json!(42), json!(42))]
	#[case(CtrlType::Dropdown, json!("x"), json!([]))]
	#[case(CtrlType::RadioGroup, json!([1]), json!([1]))]
	#[case(CtrlType::CheckboxGroup, json!(null), json!([]))]
	#[case(CtrlType::SingleOption, json!(3), json!([]))]
	#[case(CtrlType::MultipleOption, json!(["a", "b"]), json!(["a", "b"]))]
	#[case(CtrlType::Default, json!("text"), json!("text"))]
	#[case(CtrlType::Default, json!(null), json!(""))]
	// Falsy scalars collapse to the empty string for plain types.
	#[case(CtrlType::Default, json!(0), json!(""))]
	#[case(CtrlType::Textarea, json!(false), json!(""))]
	#[case(CtrlType::Email, json!(7), json!(7))]
	fn test_coerce_value(#[case] ctrl_type: CtrlType, #[case] input: Value, #[case] expected: Value) {
		assert_eq!(coerce_value(ctrl_type, input), expected);
	}

	#[rstest]
	fn test_blueprint_uses_camel_case_keys() {
		let props = CtrlProps::from_blueprint(json!({
			"name": "bio",
			"type": 4,
			"maxLength": 140,
			"maxLengthMessage": "Too long",
			"customClass": "wide",
			"cols": 30,
			"rows": 8,
			"options": [],
			"unknownKey": "ignored"
		}))
		.unwrap();

		assert_eq!(props.ctrl_type, CtrlType::Textarea);
		assert_eq!(props.max_length, Some(140));
		assert_eq!(props.max_length_message, "Too long");
		assert_eq!(props.custom_class.as_deref(), Some("wide"));
		assert_eq!((props.cols, props.rows), (Some(30), Some(8)));
		assert_eq!(props.value, json!(""));
	}

	#[rstest]
	#[case(json!({"label": "no name"}))]
	#[case(json!({"name": null}))]
	#[case(json!({"name": ""}))]
	#[case(json!(["name"]))]
	fn test_blueprint_without_name(#[case] blueprint: Value) {
		assert!(matches!(
			CtrlProps::from_blueprint(blueprint),
			Err(CtrlError::MissingName)
		));
	}

	#[rstest]
	fn test_blueprint_with_unknown_type_code() {
		let result = CtrlProps::from_blueprint(json!({"name": "a", "type": 10}));
		assert!(matches!(result, Err(CtrlError::InvalidBlueprint(_))));
	}

	#[rstest]
	fn test_to_numeric_string() {
		assert_eq!(to_numeric_string(&json!("  (11) 99999-8888 ")), "11999998888");
		assert_eq!(to_numeric_string(&json!(1234)), "1234");
		assert_eq!(to_numeric_string(&json!(null)), "");
		assert_eq!(to_numeric_string(&json!(["1"])), "");
	}

	proptest! {
		#[test]
		fn prop_number_strings_keep_only_numeric_chars(input in ".{0,32}") {
			let coerced = coerce_value(CtrlType::Number, Value::String(input.clone()));
			let text = coerced.as_str().unwrap();
			prop_assert!(text.chars().all(|c| c.is_ascii_digit() || "-().,".contains(c)));
			let expected: String = input
				.chars()
				.filter(|c| c.is_ascii_digit() || "-().,".contains(*c))
				.collect();
			prop_assert_eq!(text, expected.as_str());
		}

		#[test]
		fn prop_option_types_always_hold_arrays(text in ".{0,8}", number in any::<i64>(), flag in any::<bool>()) {
			for ctrl_type in [
				CtrlType::Dropdown,
				CtrlType::RadioGroup,
				CtrlType::CheckboxGroup,
				CtrlType::SingleOption,
				CtrlType::MultipleOption,
			] {
				for value in [json!(text.clone()), json!(number), json!(flag), Value::Null] {
					let props = map_default_ctrl_props(CtrlProps::new("a").with_type(ctrl_type).with_value(value));
					prop_assert!(props.value.is_array());
				}
			}
		}

		#[test]
		fn prop_to_numeric_string_only_digits(input in ".{0,32}") {
			let digits = to_numeric_string(&Value::String(input));
			prop_assert!(digits.chars().all(|c| c.is_ascii_digit()));
		}
	}
}
