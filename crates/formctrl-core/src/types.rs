//! Control types, states, options and callback signatures

use crate::error::CtrlError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Input type of a control, determining its value shape, filter and rules.
///
/// Serialized as its stable integer code. Codes are grouped by range:
/// 0-10 basic types, 11-20 alternate names, 21-30 documents, 31-40 generic
/// string formats and 999 for hidden controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum CtrlType {
	#[default]
	Default = 0,
	SingleOption = 1,
	MultipleOption = 2,
	Dropdown = 3,
	Textarea = 4,
	Boolean = 5,
	Password = 6,
	Date = 7,
	Number = 8,

	CheckboxGroup = 11,
	RadioGroup = 12,

	Cnpj = 21,
	Cpf = 22,
	Pis = 23,

	CreditCard = 31,
	Email = 32,
	Phone = 33,
	Url = 34,
	Cep = 35,

	Hidden = 999,
}

impl CtrlType {
	/// Stable integer code
	pub fn code(self) -> i32 {
		self as i32
	}

	/// Types whose value is a list of selected option values.
	pub fn is_option_type(self) -> bool {
		matches!(
			self,
			CtrlType::Dropdown
				| CtrlType::RadioGroup
				| CtrlType::CheckboxGroup
				| CtrlType::SingleOption
				| CtrlType::MultipleOption
		)
	}

	/// Types whose displayed value carries punctuation that must not count
	/// toward length limits.
	pub fn is_numeric_document(self) -> bool {
		matches!(
			self,
			CtrlType::Cnpj
				| CtrlType::Cpf
				| CtrlType::Pis
				| CtrlType::CreditCard
				| CtrlType::Phone
				| CtrlType::Date
		)
	}

	/// Widget kind a renderer should use for this type.
	///
	/// # Examples
	///
	/// ```
	/// use formctrl_core::CtrlType;
	///
	/// assert_eq!(CtrlType::RadioGroup.input_type(), "radio");
	/// assert_eq!(CtrlType::Cpf.input_type(), "tel");
	/// assert_eq!(CtrlType::Url.input_type(), "text");
	/// ```
	pub fn input_type(self) -> &'static str {
		match self {
			CtrlType::SingleOption | CtrlType::RadioGroup => "radio",
			CtrlType::MultipleOption | CtrlType::CheckboxGroup | CtrlType::Boolean => "checkbox",
			CtrlType::Dropdown => "select",
			CtrlType::Textarea => "textarea",
			CtrlType::Cnpj
			| CtrlType::Cpf
			| CtrlType::Pis
			| CtrlType::CreditCard
			| CtrlType::Phone
			| CtrlType::Cep => "tel",
			CtrlType::Password => "password",
			CtrlType::Email => "email",
			_ => "text",
		}
	}
}

impl From<CtrlType> for i32 {
	fn from(ctrl_type: CtrlType) -> Self {
		ctrl_type.code()
	}
}

impl TryFrom<i32> for CtrlType {
	type Error = CtrlError;

	fn try_from(code: i32) -> Result<Self, Self::Error> {
		let ctrl_type = match code {
			0 => CtrlType::Default,
			1 => CtrlType::SingleOption,
			2 => CtrlType::MultipleOption,
			3 => CtrlType::Dropdown,
			4 => CtrlType::Textarea,
			5 => CtrlType::Boolean,
			6 => CtrlType::Password,
			7 => CtrlType::Date,
			8 => CtrlType::Number,
			11 => CtrlType::CheckboxGroup,
			12 => CtrlType::RadioGroup,
			21 => CtrlType::Cnpj,
			22 => CtrlType::Cpf,
			23 => CtrlType::Pis,
			31 => CtrlType::CreditCard,
			32 => CtrlType::Email,
			33 => CtrlType::Phone,
			34 => CtrlType::Url,
			35 => CtrlType::Cep,
			999 => CtrlType::Hidden,
			other => return Err(CtrlError::UnknownType(other)),
		};
		Ok(ctrl_type)
	}
}

/// Feedback state of a control.
///
/// Validation only ever produces `Normal` or `Error`; `Valid` is reserved for
/// callers that want to mark a control explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum CtrlState {
	Error = -1,
	#[default]
	Normal = 0,
	Valid = 1,
}

impl From<CtrlState> for i32 {
	fn from(state: CtrlState) -> Self {
		state as i32
	}
}

impl TryFrom<i32> for CtrlState {
	type Error = CtrlError;

	fn try_from(code: i32) -> Result<Self, CtrlError> {
		match code {
			-1 => Ok(CtrlState::Error),
			0 => Ok(CtrlState::Normal),
			1 => Ok(CtrlState::Valid),
			other => Err(CtrlError::UnknownState(other)),
		}
	}
}

/// One selectable option of an option-bearing control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CtrlOption {
	/// Human-readable option text
	pub name: String,
	pub value: Value,
	#[serde(default)]
	pub custom: bool,
	#[serde(default)]
	pub disabled: bool,
	#[serde(default)]
	pub inline: bool,
}

impl CtrlOption {
	pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
			custom: false,
			disabled: false,
			inline: false,
		}
	}

	pub fn disabled(mut self) -> Self {
		self.disabled = true;
		self
	}

	pub fn custom(mut self) -> Self {
		self.custom = true;
		self
	}

	pub fn inline(mut self) -> Self {
		self.inline = true;
		self
	}
}

/// Which event handler produced a change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
	Value,
	Toggle,
	Boolean,
}

/// Context passed to a control's change callback.
#[derive(Debug, Clone, Copy)]
pub struct ChangeEvent<'a> {
	/// Name of the control that changed
	pub name: &'a str,
	pub kind: ChangeKind,
}

/// Called after every accepted change with the raw input value.
pub type ChangeCallback = Arc<dyn Fn(&ChangeEvent<'_>, &Value) + Send + Sync>;

/// Value transform applied on change events and once at construction.
///
/// Returning an error stops the interceptor pipeline.
pub type Interceptor = Arc<dyn Fn(Value) -> anyhow::Result<Value> + Send + Sync>;
