//! Form control model
//!
//! This crate models the fields of a form independently of any renderer:
//!
//! - [`Ctrl`]: a named, typed field with its value, presentation hints and
//!   a fixed chain of validation rules
//! - [`CtrlCollection`]: an ordered tree of controls with scoped lookup,
//!   replacement, bulk validation and payload serialization
//! - [`CtrlProps`]: the declarative blueprint a control is built from,
//!   loadable from camelCase JSON
//! - [`FormatProvider`]: the type-keyed filters and format checks a control
//!   delegates to, [`StandardFormats`] by default
//!
//! Failures that the caller can recover from are returned as [`CtrlError`]
//! and logged through `tracing`; a failing rule is not an error but a
//! control [`state`](Ctrl::state) and [`message`](Ctrl::message).
//!
//! # Examples
//!
//! ```
//! use formctrl_core::{CtrlCollection, CtrlProps, CtrlType};
//! use serde_json::json;
//!
//! let mut form = CtrlCollection::new();
//! form.add(CtrlProps::new("email").with_type(CtrlType::Email).required())
//!     .unwrap()
//!     .add(CtrlProps::new("phone").with_type(CtrlType::Phone))
//!     .unwrap();
//!
//! assert!(!form.validate());
//! assert_eq!(form.required, vec!["email".to_string()]);
//!
//! form.set_value("email", "ana@example.com", None).unwrap();
//! form.get_ctrl_mut("phone", None).unwrap().on_value_change("81988887777");
//!
//! assert!(form.validate());
//! assert_eq!(
//!     form.to_json(false),
//!     json!({"email": "ana@example.com", "phone": "(81) 98888-7777"})
//! );
//! ```

pub mod collection;
pub mod ctrl;
pub mod error;
pub mod format;
pub mod props;
pub mod types;
pub mod value;

pub use collection::{CtrlArg, CtrlCollection, CtrlNode};
pub use ctrl::{Ctrl, INVALID_INPUT_MESSAGE};
pub use error::{CtrlError, CtrlResult};
pub use format::{FormatProvider, StandardFormats};
pub use props::{
	CtrlProps, coerce_value, create_empty_props, map_default_ctrl_props, to_numeric_string,
	validate_ctrl_props,
};
pub use types::{
	ChangeCallback, ChangeEvent, ChangeKind, CtrlOption, CtrlState, CtrlType, Interceptor,
};
pub use value::{CtrlValue, is_truthy, value_length, value_text};
