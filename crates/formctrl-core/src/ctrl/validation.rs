//! Rule chain of a control
//!
//! Rules always run in the same order and none of them returns early, so
//! when several rules fail the message of the last one is the one left on
//! the control.

use super::Ctrl;
use crate::props::to_numeric_string;
use crate::types::{CtrlState, CtrlType};
use crate::value::{is_truthy, value_length, value_text};
use serde_json::Value;
use std::borrow::Cow;

type Rule = fn(&mut Ctrl) -> bool;

const RULES: [(&str, Rule); 13] = [
	("required", Ctrl::validate_required),
	("min_length", Ctrl::validate_min_length),
	("max_length", Ctrl::validate_max_length),
	("min_answers", Ctrl::validate_min_answers),
	("max_answers", Ctrl::validate_max_answers),
	("regex", Ctrl::validate_regex),
	("date", Ctrl::validate_date),
	("email", Ctrl::validate_email),
	("url", Ctrl::validate_url),
	("cnpj", Ctrl::validate_cnpj),
	("cpf", Ctrl::validate_cpf),
	("pis", Ctrl::validate_pis),
	("credit_card", Ctrl::validate_credit_card),
];

impl Ctrl {
	/// Resets the state and runs every rule.
	///
	/// Returns `true` when all rules pass. A failing rule sets the `Error`
	/// state and its own message, overwriting earlier failures.
	///
	/// # Examples
	///
	/// ```
	/// use formctrl_core::{Ctrl, CtrlProps, CtrlType};
	///
	/// let mut ctrl = Ctrl::new(
	///     CtrlProps::new("email").with_type(CtrlType::Email).with_value("user@"),
	/// )
	/// .unwrap();
	/// assert!(!ctrl.validate());
	/// assert_eq!(ctrl.message, "Invalid email address provided.");
	/// ```
	pub fn validate(&mut self) -> bool {
		self.reset_state(false);

		let mut valid = true;
		for (rule, check) in RULES {
			let passed = check(self);
			if !passed {
				tracing::debug!(ctrl = %self.name, rule, "rule failed");
			}
			valid &= passed;
		}

		tracing::debug!(ctrl = %self.name, valid, "validated control");
		valid
	}

	fn fail(&mut self, message: fn(&Ctrl) -> &String) -> bool {
		self.message = message(self).clone();
		self.state = CtrlState::Error;
		false
	}

	/// Value as measured by the length rules; document-like types count
	/// digits only.
	fn length_subject(&self) -> Cow<'_, Value> {
		if self.ctrl_type.is_numeric_document() {
			Cow::Owned(Value::String(to_numeric_string(&self.value)))
		} else {
			Cow::Borrowed(&self.value)
		}
	}

	/// Value truthy and the provider rejects it, for a control of `ctrl_type`
	fn rejected_as(&self, ctrl_type: CtrlType) -> bool {
		self.ctrl_type == ctrl_type
			&& is_truthy(&self.value)
			&& !self.formats.validate(ctrl_type, &self.value)
	}

	fn validate_required(&mut self) -> bool {
		let empty = match &self.value {
			Value::Array(items) => items.is_empty(),
			other => !is_truthy(other),
		};
		if self.required && empty {
			return self.fail(|c| &c.required_message);
		}
		true
	}

	fn validate_min_length(&mut self) -> bool {
		let Some(min) = self.min_length.filter(|n| *n > 1) else {
			return true;
		};
		let too_short = {
			let subject = self.length_subject();
			is_truthy(&subject) && value_length(&subject).is_some_and(|len| len < min)
		};
		if too_short {
			return self.fail(|c| &c.min_length_message);
		}
		true
	}

	fn validate_max_length(&mut self) -> bool {
		let Some(max) = self.max_length.filter(|n| *n > 1) else {
			return true;
		};
		let too_long = {
			let subject = self.length_subject();
			is_truthy(&subject) && value_length(&subject).is_some_and(|len| len > max)
		};
		if too_long {
			return self.fail(|c| &c.max_length_message);
		}
		true
	}

	fn validate_min_answers(&mut self) -> bool {
		if let Some(min) = self.min_answers.filter(|n| *n > 1)
			&& let Value::Array(answers) = &self.value
			&& answers.len() < min
		{
			return self.fail(|c| &c.min_answers_message);
		}
		true
	}

	fn validate_max_answers(&mut self) -> bool {
		if let Some(max) = self.max_answers.filter(|n| *n > 1)
			&& let Value::Array(answers) = &self.value
			&& answers.len() > max
		{
			return self.fail(|c| &c.max_answers_message);
		}
		true
	}

	fn validate_regex(&mut self) -> bool {
		if let Some(regex) = &self.regex
			&& is_truthy(&self.value)
			&& !regex.is_match(&value_text(&self.value))
		{
			return self.fail(|c| &c.regex_message);
		}
		true
	}

	fn validate_date(&mut self) -> bool {
		if self.rejected_as(CtrlType::Date) {
			return self.fail(|c| &c.date_message);
		}
		true
	}

	fn validate_email(&mut self) -> bool {
		if self.rejected_as(CtrlType::Email) {
			return self.fail(|c| &c.email_message);
		}
		true
	}

	fn validate_url(&mut self) -> bool {
		if self.rejected_as(CtrlType::Url) {
			return self.fail(|c| &c.url_message);
		}
		true
	}

	fn validate_cnpj(&mut self) -> bool {
		if self.rejected_as(CtrlType::Cnpj) {
			return self.fail(|c| &c.cnpj_message);
		}
		true
	}

	fn validate_cpf(&mut self) -> bool {
		if self.rejected_as(CtrlType::Cpf) {
			return self.fail(|c| &c.cpf_message);
		}
		true
	}

	fn validate_pis(&mut self) -> bool {
		if self.rejected_as(CtrlType::Pis) {
			return self.fail(|c| &c.pis_message);
		}
		true
	}

	fn validate_credit_card(&mut self) -> bool {
		if self.rejected_as(CtrlType::CreditCard) {
			return self.fail(|c| &c.credit_card_message);
		}
		true
	}
}
