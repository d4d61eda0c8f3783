//! Ordered, nestable groups of controls
//!
//! A [`CtrlCollection`] holds controls and sub-collections in insertion
//! order. Named sub-collections scope lookups and nest their payload under
//! their name; anonymous ones only group controls and flatten into their
//! parent when serialized.
//!
//! ```
//! use formctrl_core::{CtrlCollection, CtrlProps};
//! use serde_json::json;
//!
//! let mut address = CtrlCollection::named("address");
//! address.add(CtrlProps::new("city").with_value("Recife")).unwrap();
//!
//! let mut form = CtrlCollection::new();
//! form.add(CtrlProps::new("name").with_value("Ana"))
//!     .unwrap()
//!     .add(address)
//!     .unwrap();
//!
//! assert_eq!(form.get_value("city", Some("address")), Some(&json!("Recife")));
//! assert_eq!(form.to_json(false), json!({"name": "Ana", "address": {"city": "Recife"}}));
//! ```

use crate::ctrl::Ctrl;
use crate::error::{CtrlError, CtrlResult};
use crate::props::CtrlProps;
use crate::types::CtrlType;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Element of a collection
#[derive(Debug, Clone)]
pub enum CtrlNode {
	Ctrl(Box<Ctrl>),
	Collection(CtrlCollection),
}

impl CtrlNode {
	/// Control name, or the collection name when it has one
	pub fn name(&self) -> Option<&str> {
		match self {
			CtrlNode::Ctrl(ctrl) => Some(&ctrl.name),
			CtrlNode::Collection(collection) => collection.name.as_deref(),
		}
	}

	pub fn as_ctrl(&self) -> Option<&Ctrl> {
		match self {
			CtrlNode::Ctrl(ctrl) => Some(ctrl),
			CtrlNode::Collection(_) => None,
		}
	}

	pub fn as_ctrl_mut(&mut self) -> Option<&mut Ctrl> {
		match self {
			CtrlNode::Ctrl(ctrl) => Some(ctrl),
			CtrlNode::Collection(_) => None,
		}
	}

	pub fn as_collection(&self) -> Option<&CtrlCollection> {
		match self {
			CtrlNode::Collection(collection) => Some(collection),
			CtrlNode::Ctrl(_) => None,
		}
	}

	pub fn as_collection_mut(&mut self) -> Option<&mut CtrlCollection> {
		match self {
			CtrlNode::Collection(collection) => Some(collection),
			CtrlNode::Ctrl(_) => None,
		}
	}

	pub fn validate(&mut self) -> bool {
		match self {
			CtrlNode::Ctrl(ctrl) => ctrl.validate(),
			CtrlNode::Collection(collection) => collection.validate(),
		}
	}
}

impl From<Ctrl> for CtrlNode {
	fn from(ctrl: Ctrl) -> Self {
		CtrlNode::Ctrl(Box::new(ctrl))
	}
}

impl From<CtrlCollection> for CtrlNode {
	fn from(collection: CtrlCollection) -> Self {
		CtrlNode::Collection(collection)
	}
}

/// Anything [`CtrlCollection::add`] accepts.
///
/// Lists become a new anonymous sub-collection; properties and blueprints
/// are built into a [`Ctrl`].
#[derive(Debug)]
pub enum CtrlArg {
	Ctrl(Ctrl),
	Collection(CtrlCollection),
	List(Vec<CtrlArg>),
	Props(CtrlProps),
	/// Raw JSON blueprint. `null` stands for a missing argument.
	Blueprint(Value),
}

impl From<Ctrl> for CtrlArg {
	fn from(ctrl: Ctrl) -> Self {
		CtrlArg::Ctrl(ctrl)
	}
}

impl From<CtrlCollection> for CtrlArg {
	fn from(collection: CtrlCollection) -> Self {
		CtrlArg::Collection(collection)
	}
}

impl From<CtrlProps> for CtrlArg {
	fn from(props: CtrlProps) -> Self {
		CtrlArg::Props(props)
	}
}

impl<T: Into<CtrlArg>> From<Vec<T>> for CtrlArg {
	fn from(items: Vec<T>) -> Self {
		CtrlArg::List(items.into_iter().map(Into::into).collect())
	}
}

impl From<Value> for CtrlArg {
	fn from(value: Value) -> Self {
		match value {
			Value::Array(items) => CtrlArg::List(items.into_iter().map(CtrlArg::from).collect()),
			other => CtrlArg::Blueprint(other),
		}
	}
}

impl CtrlArg {
	fn into_node(self) -> CtrlResult<CtrlNode> {
		match self {
			CtrlArg::Ctrl(ctrl) => Ok(ctrl.into()),
			CtrlArg::Collection(collection) => Ok(collection.into()),
			CtrlArg::List(items) => {
				let mut collection = CtrlCollection::new();
				for item in items {
					// Failures are already reported by `add`; the rest of the list still goes in.
					let _ = collection.add(item);
				}
				Ok(collection.into())
			}
			CtrlArg::Props(props) => Ctrl::new(props).map(CtrlNode::from),
			CtrlArg::Blueprint(Value::Null) => Err(CtrlError::MissingArgument),
			CtrlArg::Blueprint(Value::Array(items)) => CtrlArg::from(Value::Array(items)).into_node(),
			CtrlArg::Blueprint(blueprint) => {
				Ctrl::new(CtrlProps::from_blueprint(blueprint)?).map(CtrlNode::from)
			}
		}
	}
}

/// Ordered group of controls and sub-collections.
#[derive(Debug, Clone, Default)]
pub struct CtrlCollection {
	/// Scope name; `None` for anonymous collections
	pub name: Option<String>,
	/// Messages of failing hidden controls from the last [`validate`](Self::validate),
	/// joined with `"\r\n"`
	pub message: Option<String>,
	/// Names of failing required controls from the last [`validate`](Self::validate)
	pub required: Vec<String>,
	nodes: Vec<CtrlNode>,
}

impl CtrlCollection {
	/// Anonymous, empty collection
	pub fn new() -> Self {
		Self::default()
	}

	/// Empty collection with a scope name. An empty name gives an anonymous
	/// collection.
	pub fn named(name: impl Into<String>) -> Self {
		let name = name.into();
		Self {
			name: (!name.is_empty()).then_some(name),
			..Self::default()
		}
	}

	/// Builds an anonymous collection from a JSON document.
	///
	/// An array adds each element (nested arrays become anonymous
	/// sub-collections), an object adds a single control.
	///
	/// # Errors
	///
	/// [`CtrlError::InvalidBlueprint`] for malformed JSON, or the first error
	/// raised while building an element.
	///
	/// # Examples
	///
	/// ```
	/// use formctrl_core::CtrlCollection;
	/// use serde_json::json;
	///
	/// let form = CtrlCollection::from_json_str(
	///     r#"[{"name": "email", "type": 32, "required": true}, {"name": "age", "type": 8}]"#,
	/// )
	/// .unwrap();
	///
	/// assert_eq!(form.len(), 2);
	/// assert_eq!(form.to_json(false), json!({"email": "", "age": ""}));
	/// ```
	pub fn from_json_str(json: &str) -> CtrlResult<Self> {
		let document: Value =
			serde_json::from_str(json).map_err(|e| CtrlError::InvalidBlueprint(e.to_string()))?;

		let mut collection = Self::new();
		match document {
			Value::Array(items) => {
				for item in items {
					collection.add(item)?;
				}
			}
			other => {
				collection.add(other)?;
			}
		}
		Ok(collection)
	}

	pub fn nodes(&self) -> &[CtrlNode] {
		&self.nodes
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Appends a control, a sub-collection, a list or a blueprint.
	///
	/// # Errors
	///
	/// [`CtrlError::MissingArgument`] for a `null` blueprint, and any error
	/// raised while building the control. The collection is left unchanged.
	pub fn add(&mut self, arg: impl Into<CtrlArg>) -> CtrlResult<&mut Self> {
		let arg: CtrlArg = arg.into();
		let node = arg.into_node().inspect_err(|error| {
			tracing::warn!(collection = %self, error = %error, "could not add to collection");
		})?;
		tracing::debug!(collection = %self, node = ?node.name(), "added node");
		self.nodes.push(node);
		Ok(self)
	}

	/// Finds a node by name.
	///
	/// Without `sub_collection` the whole tree is searched depth first, a
	/// sub-collection's contents before the sub-collection itself. With it,
	/// only the direct child collection of that name is searched.
	pub fn get(&self, name: &str, sub_collection: Option<&str>) -> Option<&CtrlNode> {
		let scope = self.scope(sub_collection)?;
		let path = scope.find_path(name)?;
		scope.node_at(&path)
	}

	pub fn get_mut(&mut self, name: &str, sub_collection: Option<&str>) -> Option<&mut CtrlNode> {
		let scope = self.scope_mut(sub_collection)?;
		let path = scope.find_path(name)?;
		scope.node_at_mut(&path)
	}

	/// Like [`get`](Self::get), but only matches controls.
	pub fn get_ctrl(&self, name: &str, sub_collection: Option<&str>) -> Option<&Ctrl> {
		self.get(name, sub_collection)?.as_ctrl()
	}

	pub fn get_ctrl_mut(&mut self, name: &str, sub_collection: Option<&str>) -> Option<&mut Ctrl> {
		self.get_mut(name, sub_collection)?.as_ctrl_mut()
	}

	/// Value of the matching control; `None` when nothing matches or the
	/// match is a collection.
	pub fn get_value(&self, name: &str, sub_collection: Option<&str>) -> Option<&Value> {
		self.get_ctrl(name, sub_collection).map(Ctrl::value)
	}

	/// Replaces the node matching `ctrl.name` with `ctrl`.
	///
	/// The search is scoped like [`get`](Self::get). When nothing matches,
	/// `ctrl` is appended to the searched collection; an unknown
	/// `sub_collection` falls back to this collection.
	pub fn set(&mut self, ctrl: Ctrl, sub_collection: Option<&str>) -> &mut Self {
		match self.scope_mut(sub_collection) {
			Some(scope) => scope.replace_or_push(ctrl),
			None => {
				tracing::debug!(
					collection = %self,
					sub_collection,
					"sub-collection not found, setting on the outer collection"
				);
				self.replace_or_push(ctrl);
			}
		}
		self
	}

	/// Assigns the value of a control found like [`get`](Self::get).
	///
	/// Only the type filter runs; interceptors are reserved for change events.
	///
	/// # Errors
	///
	/// [`CtrlError::NotFound`] when no control matches.
	pub fn set_value(
		&mut self,
		name: &str,
		value: impl Into<Value>,
		sub_collection: Option<&str>,
	) -> CtrlResult<&mut Self> {
		let Some(ctrl) = self.get_ctrl_mut(name, sub_collection) else {
			return Err(self.not_found(name, sub_collection));
		};
		ctrl.set_value(value);
		Ok(self)
	}

	/// Removes the first node found like [`get`](Self::get); does nothing
	/// when nothing matches.
	pub fn remove(&mut self, name: &str, sub_collection: Option<&str>) -> &mut Self {
		if self.take(name, sub_collection).is_none() {
			tracing::debug!(collection = %self, name, "nothing to remove");
		}
		self
	}

	/// Removes and returns the first node found like [`get`](Self::get).
	pub fn take(&mut self, name: &str, sub_collection: Option<&str>) -> Option<CtrlNode> {
		let scope = self.scope_mut(sub_collection)?;
		let path = scope.find_path(name)?;
		scope.take_at(&path)
	}

	/// Validates every node, without stopping at the first failure.
	///
	/// Refreshes [`message`](Self::message) and [`required`](Self::required)
	/// from the failing nodes, including nested collections.
	pub fn validate(&mut self) -> bool {
		let mut valid = true;
		let mut messages = Vec::new();
		let mut required = Vec::new();

		for node in &mut self.nodes {
			let node_valid = node.validate();
			if !node_valid {
				match node {
					CtrlNode::Ctrl(ctrl) if ctrl.ctrl_type() == CtrlType::Hidden => {
						messages.push(ctrl.message.clone());
					}
					CtrlNode::Ctrl(ctrl) if ctrl.required => required.push(ctrl.name.clone()),
					CtrlNode::Ctrl(_) => {}
					CtrlNode::Collection(collection) => {
						messages.extend(collection.message.clone());
						required.extend(collection.required.iter().cloned());
					}
				}
			}
			valid &= node_valid;
		}

		self.message = (!messages.is_empty()).then(|| messages.join("\r\n"));
		self.required = required;

		tracing::debug!(collection = %self, valid, "validated collection");
		valid
	}

	/// Forces one control into the error state.
	///
	/// # Errors
	///
	/// [`CtrlError::NotFound`] when no control matches.
	pub fn invalidate(
		&mut self,
		name: &str,
		message: impl Into<String>,
		sub_collection: Option<&str>,
	) -> CtrlResult<&mut Self> {
		let Some(ctrl) = self.get_ctrl_mut(name, sub_collection) else {
			return Err(self.not_found(name, sub_collection));
		};
		ctrl.invalidate(message);
		Ok(self)
	}

	/// Invalidates every control in the tree with the generic message.
	///
	/// Meant for a form rejected as a whole; every field shows an error.
	pub fn invalidate_all(&mut self) -> &mut Self {
		for node in &mut self.nodes {
			match node {
				CtrlNode::Ctrl(ctrl) => {
					ctrl.invalidate("");
				}
				CtrlNode::Collection(collection) => {
					collection.invalidate_all();
				}
			}
		}
		self
	}

	/// Form payload: control names (or aliases) mapped to values.
	///
	/// Named sub-collections nest under their name, anonymous ones flatten
	/// into the current level.
	pub fn to_object(&self, use_alias: bool) -> Map<String, Value> {
		let mut object = Map::new();
		self.write_into(&mut object, use_alias);
		object
	}

	/// [`to_object`](Self::to_object) as a JSON value.
	pub fn to_json(&self, use_alias: bool) -> Value {
		Value::Object(self.to_object(use_alias))
	}

	/// All controls of the tree, depth first in insertion order.
	pub fn iter_ctrls(&self) -> impl Iterator<Item = &Ctrl> {
		let mut ctrls = Vec::new();
		self.collect_ctrls(&mut ctrls);
		ctrls.into_iter()
	}

	fn collect_ctrls<'a>(&'a self, out: &mut Vec<&'a Ctrl>) {
		for node in &self.nodes {
			match node {
				CtrlNode::Ctrl(ctrl) => out.push(ctrl),
				CtrlNode::Collection(collection) => collection.collect_ctrls(out),
			}
		}
	}

	fn write_into(&self, object: &mut Map<String, Value>, use_alias: bool) {
		for node in &self.nodes {
			match node {
				CtrlNode::Ctrl(ctrl) => {
					let key = if use_alias && !ctrl.alias.is_empty() {
						&ctrl.alias
					} else {
						&ctrl.name
					};
					object.insert(key.clone(), ctrl.value().clone());
				}
				CtrlNode::Collection(collection) => match &collection.name {
					Some(name) => {
						object.insert(name.clone(), collection.to_json(use_alias));
					}
					None => collection.write_into(object, use_alias),
				},
			}
		}
	}

	fn not_found(&self, name: &str, sub_collection: Option<&str>) -> CtrlError {
		tracing::warn!(collection = %self, name, sub_collection, "control not found");
		CtrlError::NotFound {
			name: name.to_string(),
			sub_collection: sub_collection.map(str::to_string),
		}
	}

	fn is_scope(&self, scope: &str) -> bool {
		self.name.as_deref() == Some(scope)
	}

	fn scope(&self, sub_collection: Option<&str>) -> Option<&CtrlCollection> {
		match sub_collection.filter(|s| !s.is_empty()) {
			None => Some(self),
			Some(scope) => self
				.nodes
				.iter()
				.find_map(|node| node.as_collection().filter(|c| c.is_scope(scope))),
		}
	}

	fn scope_mut(&mut self, sub_collection: Option<&str>) -> Option<&mut CtrlCollection> {
		match sub_collection.filter(|s| !s.is_empty()) {
			None => Some(self),
			Some(scope) => self
				.nodes
				.iter_mut()
				.find_map(|node| node.as_collection_mut().filter(|c| c.is_scope(scope))),
		}
	}

	/// Index path of the first depth-first match
	fn find_path(&self, name: &str) -> Option<Vec<usize>> {
		for (index, node) in self.nodes.iter().enumerate() {
			if let CtrlNode::Collection(collection) = node
				&& let Some(mut path) = collection.find_path(name)
			{
				path.insert(0, index);
				return Some(path);
			}
			if node.name() == Some(name) {
				return Some(vec![index]);
			}
		}
		None
	}

	fn node_at(&self, path: &[usize]) -> Option<&CtrlNode> {
		match path {
			[] => None,
			[index] => self.nodes.get(*index),
			[index, rest @ ..] => self.nodes.get(*index)?.as_collection()?.node_at(rest),
		}
	}

	fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut CtrlNode> {
		match path {
			[] => None,
			[index] => self.nodes.get_mut(*index),
			[index, rest @ ..] => self
				.nodes
				.get_mut(*index)?
				.as_collection_mut()?
				.node_at_mut(rest),
		}
	}

	fn take_at(&mut self, path: &[usize]) -> Option<CtrlNode> {
		match path {
			[] => None,
			[index] => (*index < self.nodes.len()).then(|| self.nodes.remove(*index)),
			[index, rest @ ..] => self.nodes.get_mut(*index)?.as_collection_mut()?.take_at(rest),
		}
	}

	fn replace_or_push(&mut self, ctrl: Ctrl) {
		let name = ctrl.name.clone();
		let existing = match self.find_path(&name) {
			Some(path) => self.node_at_mut(&path),
			None => None,
		};
		let replaced = match existing {
			Some(node) => {
				*node = ctrl.into();
				true
			}
			None => {
				self.nodes.push(ctrl.into());
				false
			}
		};
		tracing::debug!(collection = %self, ctrl = %name, replaced, "set control");
	}

	fn display_name(&self) -> &str {
		self.name.as_deref().unwrap_or("anonymous")
	}
}

impl fmt::Display for CtrlCollection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "CtrlCollection({})", self.display_name())
	}
}

impl Serialize for CtrlCollection {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.to_object(false).serialize(serializer)
	}
}
