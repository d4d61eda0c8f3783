//! # formctrl
//!
//! Form field models for Rust: typed controls with display filters,
//! caller-supplied interceptors, a fixed validation chain and nested,
//! serializable collections.
//!
//! The crate is split into:
//!
//! - [`formctrl_core`]: [`Ctrl`], [`CtrlCollection`], [`CtrlProps`] and the
//!   [`FormatProvider`] seam
//! - `formctrl-validators`: the per-format filters and validators (CPF,
//!   CNPJ, PIS, CEP, phone, date, email, URL, credit card)
//!
//! ## Feature Flags
//!
//! - `validators` (default) - re-exports the format routines as
//!   [`validators`]
//!
//! ## Quick Example
//!
//! ```
//! use formctrl::prelude::*;
//! use serde_json::json;
//!
//! let mut form = CtrlCollection::from_json_str(
//!     r#"[
//!         {"name": "cpf", "type": 22, "required": true},
//!         {"name": "birth", "type": 7}
//!     ]"#,
//! )
//! .unwrap();
//!
//! form.get_ctrl_mut("cpf", None).unwrap().on_value_change("52998224725");
//! form.get_ctrl_mut("birth", None).unwrap().on_value_change("31022000");
//!
//! assert!(!form.validate());
//! assert_eq!(form.get_ctrl("birth", None).unwrap().message, "Invalid date value.");
//! assert_eq!(
//!     form.to_json(false),
//!     json!({"cpf": "529.982.247-25", "birth": "31/02/2000"})
//! );
//! ```

pub use formctrl_core::*;

#[cfg(feature = "validators")]
pub mod validators {
	//! Format filters and validators used by [`StandardFormats`](crate::StandardFormats)
	pub use formctrl_validators::*;
}

pub mod prelude {
	pub use crate::{
		ChangeEvent, ChangeKind, Ctrl, CtrlArg, CtrlCollection, CtrlError, CtrlNode, CtrlOption,
		CtrlProps, CtrlResult, CtrlState, CtrlType, FormatProvider, StandardFormats,
	};

	#[cfg(feature = "validators")]
	pub use crate::validators::{Filter, Validator};
}
