//! The form control entity
//!
//! A [`Ctrl`] owns a typed value, its presentation hints and the rule set
//! checked by [`Ctrl::validate`]. Every write to the value goes through the
//! type filter of the control's [`FormatProvider`]; change events additionally
//! run the caller's interceptors.

mod validation;

use crate::error::{CtrlError, CtrlResult};
use crate::format::{FormatProvider, StandardFormats};
use crate::props::{CtrlProps, map_default_ctrl_props};
use crate::types::{
	ChangeCallback, ChangeEvent, ChangeKind, CtrlOption, CtrlState, CtrlType, Interceptor,
};
use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::{Value, json};
use std::fmt;
use std::sync::Arc;

/// Message set by [`Ctrl::invalidate`] when no message is given
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input value provided";

/// A single named, typed and validatable form field.
///
/// # Examples
///
/// ```
/// use formctrl_core::{Ctrl, CtrlProps, CtrlState, CtrlType};
///
/// let mut ctrl = Ctrl::new(CtrlProps::new("cpf").with_type(CtrlType::Cpf).required()).unwrap();
/// assert!(!ctrl.validate());
/// assert_eq!(ctrl.message, "This field is required.");
///
/// ctrl.on_value_change("52998224725");
/// assert_eq!(ctrl.value(), "529.982.247-25");
/// assert!(ctrl.validate());
/// assert_eq!(ctrl.state, CtrlState::Normal);
/// ```
#[derive(Clone)]
pub struct Ctrl {
	pub name: String,
	pub alias: String,
	pub info_text: String,
	pub description: String,
	pub label: String,
	pub autocomplete: bool,
	pub disabled: bool,
	pub options: Vec<CtrlOption>,
	pub state: CtrlState,
	/// Current status text shown next to the field
	pub message: String,
	/// Whether the user has interacted with the control
	pub dirty: bool,
	pub placeholder: String,
	pub custom: bool,
	pub custom_class: Option<String>,
	pub wrap_class: Option<String>,
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
	ctrl_type: CtrlType,
	value: Value,
	regex: Option<Regex>,
	on_change: Option<ChangeCallback>,
	interceptors: Vec<Interceptor>,
	formats: Arc<dyn FormatProvider>,
}

impl Ctrl {
	/// Builds a control from its properties.
	///
	/// Properties are completed by [`map_default_ctrl_props`] first. The
	/// initial value is filtered, then sent once through the interceptors.
	///
	/// # Errors
	///
	/// [`CtrlError::MissingName`] when the name is empty, and
	/// [`CtrlError::InvalidRegex`] when the pattern does not compile.
	pub fn new(props: CtrlProps) -> CtrlResult<Self> {
		let CtrlProps {
			name,
			alias,
			info_text,
			description,
			label,
			autocomplete,
			value,
			disabled,
			options,
			state,
			dirty,
			placeholder,
			ctrl_type,
			custom,
			custom_class,
			wrap_class,
			on_change,
			interceptors,
			formats,
			message,
			required,
			required_message,
			max_length,
			max_length_message,
			min_length,
			min_length_message,
			max_answers,
			max_answers_message,
			min_answers,
			min_answers_message,
			regex,
			regex_message,
			date_message,
			cnpj_message,
			cpf_message,
			pis_message,
			credit_card_message,
			email_message,
			url_message,
			cols,
			rows,
		} = map_default_ctrl_props(props);

		if name.is_empty() {
			tracing::warn!("a control needs a non-empty `name`");
			return Err(CtrlError::MissingName);
		}

		let regex = match regex.as_deref().filter(|pattern| !pattern.is_empty()) {
			Some(pattern) => match Regex::new(pattern) {
				Ok(compiled) => Some(compiled),
				Err(source) => {
					tracing::warn!(ctrl = %name, pattern, error = %source, "invalid regex");
					return Err(CtrlError::InvalidRegex { name, source });
				}
			},
			None => None,
		};

		let mut ctrl = Self {
			name,
			alias,
			info_text,
			description,
			label,
			autocomplete,
			disabled,
			options,
			state,
			message,
			dirty,
			placeholder,
			custom,
			custom_class,
			wrap_class,
			required,
			required_message,
			max_length,
			max_length_message,
			min_length,
			min_length_message,
			max_answers,
			max_answers_message,
			min_answers,
			min_answers_message,
			regex_message,
			date_message,
			cnpj_message,
			cpf_message,
			pis_message,
			credit_card_message,
			email_message,
			url_message,
			cols,
			rows,
			ctrl_type,
			value: Value::Null,
			regex,
			on_change,
			interceptors,
			formats: formats.unwrap_or_else(|| Arc::new(StandardFormats)),
		};

		ctrl.set_value(value);
		let intercepted = ctrl.apply_interceptors(ctrl.value.clone());
		ctrl.set_value(intercepted);

		Ok(ctrl)
	}

	pub fn value(&self) -> &Value {
		&self.value
	}

	/// Stores a value after running the type filter.
	///
	/// Interceptors are not applied here; they belong to the change handlers.
	pub fn set_value(&mut self, value: impl Into<Value>) {
		self.value = self.formats.filter(self.ctrl_type, value.into());
	}

	pub fn ctrl_type(&self) -> CtrlType {
		self.ctrl_type
	}

	/// Compiled pattern of the regex rule, if any
	pub fn regex(&self) -> Option<&Regex> {
		self.regex.as_ref()
	}

	pub fn interceptors(&self) -> &[Interceptor] {
		&self.interceptors
	}

	/// Widget kind for the renderer (`"radio"`, `"tel"`, ...).
	pub fn get_type(&self) -> &'static str {
		self.ctrl_type.input_type()
	}

	/// Runs the interceptors in insertion order.
	///
	/// A failing interceptor stops the pipeline; the value produced by the
	/// interceptors before it is returned.
	pub fn apply_interceptors(&self, value: Value) -> Value {
		let mut current = value;
		for (index, interceptor) in self.interceptors.iter().enumerate() {
			match interceptor(current.clone()) {
				Ok(next) => current = next,
				Err(error) => {
					tracing::warn!(
						ctrl = %self.name,
						index,
						error = %error,
						"interceptor failed, keeping the last good value"
					);
					break;
				}
			}
		}
		current
	}

	/// Clears the status message and returns to `Normal`. `clean` also clears
	/// the dirty flag.
	pub fn reset_state(&mut self, clean: bool) {
		self.message.clear();
		self.state = CtrlState::Normal;
		if clean {
			self.dirty = false;
		}
	}

	/// Forces the control into the error state.
	///
	/// An empty message is replaced by [`INVALID_INPUT_MESSAGE`].
	///
	/// # Examples
	///
	/// ```
	/// use formctrl_core::{Ctrl, CtrlProps, CtrlState};
	///
	/// let mut ctrl = Ctrl::new(CtrlProps::new("email")).unwrap();
	/// ctrl.invalidate("Already registered");
	/// assert_eq!(ctrl.state, CtrlState::Error);
	/// assert_eq!(ctrl.message, "Already registered");
	///
	/// ctrl.invalidate("");
	/// assert_eq!(ctrl.message, "Invalid input value provided");
	/// ```
	pub fn invalidate(&mut self, message: impl Into<String>) -> &mut Self {
		let message = message.into();
		self.message = if message.is_empty() {
			INVALID_INPUT_MESSAGE.to_string()
		} else {
			message
		};
		self.state = CtrlState::Error;
		self
	}

	/// Whether `option` is one of the selected values.
	pub fn is_value_selected(&self, option: &Value) -> bool {
		self.value
			.as_array()
			.is_some_and(|selected| selected.contains(option))
	}

	/// Handles a checkbox flip: `previous` is the value shown before the click
	/// and its negation is stored.
	pub fn on_boolean_change(&mut self, previous: bool) {
		self.set_value(!previous);
		self.changed(ChangeKind::Boolean, &Value::Bool(previous));
	}

	/// Handles a plain value change.
	pub fn on_value_change(&mut self, value: impl Into<Value>) {
		let raw = value.into();
		let intercepted = self.apply_interceptors(raw.clone());
		self.set_value(intercepted);
		self.changed(ChangeKind::Value, &raw);
	}

	/// Toggles `value` in a multi-select control.
	///
	/// A non-array current value is replaced by `[value]` without comparing
	/// against it.
	///
	/// # Examples
	///
	/// ```
	/// use formctrl_core::{Ctrl, CtrlProps, CtrlType};
	/// use serde_json::json;
	///
	/// let mut ctrl = Ctrl::new(CtrlProps::new("tags").with_type(CtrlType::CheckboxGroup)).unwrap();
	/// ctrl.on_value_toggle("x");
	/// ctrl.on_value_toggle("y");
	/// ctrl.on_value_toggle("x");
	/// assert_eq!(ctrl.value(), &json!(["y"]));
	/// ```
	pub fn on_value_toggle(&mut self, value: impl Into<Value>) {
		let raw = value.into();
		let item = self.apply_interceptors(raw.clone());

		let toggled = match &self.value {
			Value::Array(selected) => {
				let mut selected = selected.clone();
				match selected.iter().position(|v| *v == item) {
					Some(index) => {
						selected.remove(index);
					}
					None => selected.push(item),
				}
				selected
			}
			_ => vec![item],
		};

		self.set_value(Value::Array(toggled));
		self.changed(ChangeKind::Toggle, &raw);
	}

	fn changed(&mut self, kind: ChangeKind, raw: &Value) {
		self.dirty = true;
		self.reset_state(false);
		if let Some(on_change) = &self.on_change {
			let event = ChangeEvent {
				name: &self.name,
				kind,
			};
			on_change(&event, raw);
		}
	}

	/// Display snapshot of the control.
	///
	/// Rule messages and callbacks are left out; the regex is rendered as its
	/// pattern.
	pub fn to_json(&self) -> Value {
		json!({
			"name": self.name,
			"alias": self.alias,
			"infoText": self.info_text,
			"description": self.description,
			"label": self.label,
			"autocomplete": self.autocomplete,
			"value": self.value,
			"disabled": self.disabled,
			"options": self.options,
			"state": self.state,
			"placeholder": self.placeholder,
			"type": self.ctrl_type,
			"custom": self.custom,
			"customClass": self.custom_class,
			"wrapClass": self.wrap_class,
			"required": self.required,
			"maxLength": self.max_length,
			"minLength": self.min_length,
			"maxAnswers": self.max_answers,
			"minAnswers": self.min_answers,
			"regex": self.regex.as_ref().map(Regex::as_str),
			"cols": self.cols,
			"rows": self.rows,
		})
	}
}

impl TryFrom<CtrlProps> for Ctrl {
	type Error = CtrlError;

	fn try_from(props: CtrlProps) -> Result<Self, Self::Error> {
		Ctrl::new(props)
	}
}

impl fmt::Debug for Ctrl {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Ctrl")
			.field("name", &self.name)
			.field("ctrl_type", &self.ctrl_type)
			.field("value", &self.value)
			.field("state", &self.state)
			.field("message", &self.message)
			.field("dirty", &self.dirty)
			.field("interceptors", &self.interceptors.len())
			.finish_non_exhaustive()
	}
}

impl fmt::Display for Ctrl {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Ctrl({})", self.name)
	}
}

impl Serialize for Ctrl {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.to_json().serialize(serializer)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::sync::Mutex;

	fn ctrl(props: CtrlProps) -> Ctrl {
		Ctrl::new(props).unwrap()
	}

	#[rstest]
	fn test_new_requires_name() {
		assert!(matches!(
			Ctrl::new(CtrlProps::default()),
			Err(CtrlError::MissingName)
		));
	}

	#[rstest]
	fn test_new_rejects_invalid_regex() {
		let result = Ctrl::new(CtrlProps::new("code").with_regex("(unclosed"));
		assert!(matches!(
			result,
			Err(CtrlError::InvalidRegex { ref name, .. }) if name == "code"
		));
	}

	#[rstest]
	fn test_new_fills_defaults() {
		let ctrl = ctrl(CtrlProps::new("email").with_type(CtrlType::Email));
		assert_eq!(ctrl.value(), &json!(""));
		assert_eq!(ctrl.email_message, "Invalid email address provided.");
		assert_eq!(ctrl.state, CtrlState::Normal);
		assert!(!ctrl.dirty);
	}

	#[rstest]
	fn test_initial_value_is_filtered_and_intercepted() {
		let ctrl = ctrl(
			CtrlProps::new("cpf")
				.with_type(CtrlType::Cpf)
				.with_value("abc52998224725")
				.with_interceptor(|v: Value| Ok(json!(format!("{}0", v.as_str().unwrap_or_default())))),
		);
		// Filter, interceptor, filter again: the appended digit overflows the mask.
		assert_eq!(ctrl.value(), &json!("529.982.247-25"));
	}

	#[rstest]
	fn test_set_value_filters_without_interceptors() {
		let mut ctrl = ctrl(
			CtrlProps::new("cep")
				.with_type(CtrlType::Cep)
				.with_interceptor(|_| Ok(json!("00000000"))),
		);
		ctrl.set_value("01310100");
		assert_eq!(ctrl.value(), &json!("01310-100"));
	}

	#[rstest]
	fn test_interceptors_run_in_order() {
		let ctrl = ctrl(
			CtrlProps::new("a")
				.with_interceptor(|v: Value| Ok(json!(format!("{}1", v.as_str().unwrap_or_default()))))
				.with_interceptor(|v: Value| Ok(json!(format!("{}2", v.as_str().unwrap_or_default())))),
		);
		assert_eq!(ctrl.apply_interceptors(json!("x")), json!("x12"));
	}

	#[rstest]
	fn test_failing_interceptor_keeps_last_good_value() {
		let ctrl = ctrl(
			CtrlProps::new("a")
				.with_interceptor(|v: Value| Ok(json!(format!("{}1", v.as_str().unwrap_or_default()))))
				.with_interceptor(|_| Err(anyhow::anyhow!("boom")))
				.with_interceptor(|v: Value| Ok(json!(format!("{}3", v.as_str().unwrap_or_default())))),
		);
		assert_eq!(ctrl.apply_interceptors(json!("x")), json!("x1"));
	}

	#[rstest]
	fn test_reset_state_is_idempotent() {
		let mut ctrl = ctrl(CtrlProps::new("a"));
		ctrl.on_value_change("typed");
		ctrl.invalidate("bad");

		ctrl.reset_state(false);
		let once = (ctrl.state, ctrl.message.clone(), ctrl.dirty);
		ctrl.reset_state(false);
		assert_eq!((ctrl.state, ctrl.message.clone(), ctrl.dirty), once);
		assert_eq!(once, (CtrlState::Normal, String::new(), true));

		ctrl.reset_state(true);
		assert!(!ctrl.dirty);
	}

	#[rstest]
	#[case("", INVALID_INPUT_MESSAGE)]
	#[case("custom", "custom")]
	fn test_invalidate(#[case] message: &str, #[case] expected: &str) {
		let mut ctrl = ctrl(CtrlProps::new("a"));
		let state = ctrl.invalidate(message).state;
		assert_eq!(state, CtrlState::Error);
		assert_eq!(ctrl.message, expected);
	}

	#[rstest]
	fn test_on_boolean_change_flips_and_skips_interceptors() {
		let mut ctrl = ctrl(
			CtrlProps::new("terms")
				.with_type(CtrlType::Boolean)
				.with_interceptor(|_| Ok(json!("intercepted"))),
		);
		ctrl.on_boolean_change(false);
		assert_eq!(ctrl.value(), &json!(true));
		ctrl.on_boolean_change(true);
		assert_eq!(ctrl.value(), &json!(false));
		assert!(ctrl.dirty);
	}

	#[rstest]
	fn test_change_handlers_reset_state() {
		let mut ctrl = ctrl(CtrlProps::new("a"));
		ctrl.invalidate("server says no");
		ctrl.on_value_change("again");
		assert_eq!(ctrl.state, CtrlState::Normal);
		assert_eq!(ctrl.message, "");
		assert!(ctrl.dirty);
	}

	#[rstest]
	fn test_on_change_receives_raw_value() {
		let seen: Arc<Mutex<Vec<(String, ChangeKind, Value)>>> = Arc::default();
		let sink = Arc::clone(&seen);
		let mut ctrl = ctrl(
			CtrlProps::new("phone")
				.with_type(CtrlType::Phone)
				.with_on_change(move |event, value| {
					sink.lock()
						.unwrap()
						.push((event.name.to_string(), event.kind, value.clone()));
				}),
		);

		ctrl.on_value_change("11999998888");

		assert_eq!(ctrl.value(), &json!("(11) 99999-8888"));
		let seen = seen.lock().unwrap();
		assert_eq!(
			seen.as_slice(),
			&[("phone".to_string(), ChangeKind::Value, json!("11999998888"))]
		);
	}

	#[rstest]
	#[case::boolean(CtrlType::Boolean, ChangeKind::Boolean, json!(true), json!(false))]
	#[case::toggle(CtrlType::CheckboxGroup, ChangeKind::Toggle, json!(["X"]), json!("x"))]
	fn test_on_change_receives_original_input(
		#[case] ctrl_type: CtrlType,
		#[case] kind: ChangeKind,
		#[case] stored: Value,
		#[case] received: Value,
	) {
		let seen: Arc<Mutex<Vec<(ChangeKind, Value)>>> = Arc::default();
		let sink = Arc::clone(&seen);
		let mut ctrl = ctrl(
			CtrlProps::new("choice")
				.with_type(ctrl_type)
				.with_interceptor(|v: Value| {
					Ok(match v.as_str() {
						Some(text) => json!(text.to_uppercase()),
						None => v,
					})
				})
				.with_on_change(move |event, value| {
					sink.lock().unwrap().push((event.kind, value.clone()));
				}),
		);

		match kind {
			ChangeKind::Boolean => ctrl.on_boolean_change(false),
			_ => ctrl.on_value_toggle("x"),
		}

		assert_eq!(ctrl.value(), &stored);
		assert_eq!(seen.lock().unwrap().as_slice(), &[(kind, received)]);
	}

	#[rstest]
	fn test_on_value_toggle_membership() {
		let mut ctrl = ctrl(CtrlProps::new("tags").with_type(CtrlType::CheckboxGroup));
		assert_eq!(ctrl.value(), &json!([]));

		ctrl.on_value_toggle("x");
		assert_eq!(ctrl.value(), &json!(["x"]));
		ctrl.on_value_toggle("x");
		assert_eq!(ctrl.value(), &json!([]));
		ctrl.on_value_toggle("x");
		ctrl.on_value_toggle("y");
		assert_eq!(ctrl.value(), &json!(["x", "y"]));
		assert!(ctrl.is_value_selected(&json!("y")));
		assert!(!ctrl.is_value_selected(&json!("z")));
	}

	#[rstest]
	fn test_on_value_toggle_replaces_scalar_value() {
		let mut ctrl = ctrl(CtrlProps::new("pick").with_value("x"));
		ctrl.on_value_toggle("x");
		// A scalar is never compared against the toggled item.
		assert_eq!(ctrl.value(), &json!(["x"]));
	}

	#[rstest]
	fn test_to_json_snapshot() {
		let ctrl = ctrl(
			CtrlProps::new("zip")
				.with_alias("postal_code")
				.with_type(CtrlType::Cep)
				.with_value("01310100")
				.with_regex(r"^\d{5}-\d{3}$")
				.with_max_length(9)
				.required(),
		);
		let snapshot = ctrl.to_json();

		assert_eq!(snapshot["name"], "zip");
		assert_eq!(snapshot["alias"], "postal_code");
		assert_eq!(snapshot["value"], "01310-100");
		assert_eq!(snapshot["type"], 35);
		assert_eq!(snapshot["state"], 0);
		assert_eq!(snapshot["regex"], r"^\d{5}-\d{3}$");
		assert_eq!(snapshot["maxLength"], 9);
		assert_eq!(snapshot["minLength"], Value::Null);
		assert_eq!(snapshot["required"], true);
		assert!(snapshot.get("requiredMessage").is_none());
		assert_eq!(serde_json::to_value(&ctrl).unwrap(), snapshot);
	}

	#[rstest]
	fn test_display_and_get_type() {
		let ctrl = ctrl(CtrlProps::new("country").with_type(CtrlType::Dropdown));
		assert_eq!(ctrl.to_string(), "Ctrl(country)");
		assert_eq!(ctrl.get_type(), "select");
	}
}
