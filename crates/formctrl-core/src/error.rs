//! Error types for controls and collections

#[derive(Debug, thiserror::Error)]
pub enum CtrlError {
	#[error("You must provide at least a `name` attribute to a `Ctrl`")]
	MissingName,
	#[error("Invalid regex for control '{name}': {source}")]
	InvalidRegex {
		name: String,
		#[source]
		source: regex::Error,
	},
	#[error("Invalid control blueprint: {0}")]
	InvalidBlueprint(String),
	#[error("Please provide a valid `Ctrl`, `CtrlCollection` or parameters to create a control")]
	MissingArgument,
	#[error("No control named '{name}' found{}", scope_suffix(.sub_collection))]
	NotFound {
		name: String,
		sub_collection: Option<String>,
	},
	#[error("Unknown control type code: {0}")]
	UnknownType(i32),
	#[error("Unknown control state code: {0}")]
	UnknownState(i32),
}

fn scope_suffix(sub_collection: &Option<String>) -> String {
	match sub_collection {
		Some(name) => format!(" in sub-collection '{name}'"),
		None => String::new(),
	}
}

pub type CtrlResult<T> = Result<T, CtrlError>;
