//! Session namespace and `$` reference expansion.
//!
//! The namespace is owned by the host and threaded explicitly through every
//! execution. The engine only reads it while expanding references; command
//! handlers receive it mutably and may change it.

mod expand;
mod loading;
mod path_ops;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use serde_json::{Map, Value};

pub use expand::{REFERENCE_SIGIL, expand, expand_tokens};
pub use path_ops::resolve_reference;

/// A value bound to a name in the namespace.
#[derive(Debug, Clone, PartialEq)]
pub enum Variable {
    /// Plain data, navigated by mapping keys.
    Value(Value),
    /// A module-like object, navigated by attribute name.
    Module(Module),
}

impl Variable {
    /// Converts the variable into plain data. Modules become objects keyed
    /// by attribute name.
    pub fn to_value(&self) -> Value {
        match self {
            Variable::Value(value) => value.clone(),
            Variable::Module(module) => module.to_value(),
        }
    }

    /// Returns the plain value, if this is not a module.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Variable::Value(value) => Some(value),
            Variable::Module(_) => None,
        }
    }
}

impl From<Value> for Variable {
    fn from(value: Value) -> Self {
        Variable::Value(value)
    }
}

impl From<Module> for Variable {
    fn from(module: Module) -> Self {
        Variable::Module(module)
    }
}

/// A named bag of attributes, resolved by attribute access rather than by
/// key lookup.
///
/// ```
/// use nbcli::namespace::{Module, Namespace, expand};
/// use serde_json::json;
///
/// let mut ns = Namespace::new();
/// ns.insert_module(Module::new("settings").with_attribute("region", json!("eu")));
///
/// assert_eq!(expand(&ns, json!("$settings.region")).unwrap(), json!("eu"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Module {
    name: String,
    attributes: BTreeMap<String, Variable>,
}

impl Module {
    /// Creates an empty module.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an attribute, builder style.
    pub fn with_attribute(mut self, name: &str, value: impl Into<Variable>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Sets an attribute, returning the previous one.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<Variable>) -> Option<Variable> {
        self.attributes.insert(name.to_string(), value.into())
    }

    /// Looks up an attribute.
    pub fn attribute(&self, name: &str) -> Option<&Variable> {
        self.attributes.get(name)
    }

    /// The module's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn to_value(&self) -> Value {
        Value::Object(
            self.attributes
                .iter()
                .map(|(name, variable)| (name.clone(), variable.to_value()))
                .collect(),
        )
    }
}

/// Mapping of live session variable names to values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    variables: BTreeMap<String, Variable>,
}

impl Namespace {
    /// Creates an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to a plain value, returning the previous binding.
    pub fn insert(&mut self, name: &str, value: impl Into<Value>) -> Option<Variable> {
        self.variables
            .insert(name.to_string(), Variable::Value(value.into()))
    }

    /// Binds a module under its own name, returning the previous binding.
    pub fn insert_module(&mut self, module: Module) -> Option<Variable> {
        self.variables
            .insert(module.name.clone(), Variable::Module(module))
    }

    /// Looks up a binding.
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Looks up a binding holding plain data.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(Variable::as_value)
    }

    /// Mutable access to a binding holding plain data.
    pub fn value_mut(&mut self, name: &str) -> Option<&mut Value> {
        match self.variables.get_mut(name) {
            Some(Variable::Value(value)) => Some(value),
            _ => None,
        }
    }

    /// Removes a binding.
    pub fn remove(&mut self, name: &str) -> Option<Variable> {
        self.variables.remove(name)
    }

    /// Whether `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether the namespace has no bindings.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterates over bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Variable)> {
        self.variables.iter()
    }

    /// Builds a namespace from the entries of a JSON object.
    ///
    /// Returns `None` if `value` is not an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self {
                variables: map
                    .into_iter()
                    .map(|(name, value)| (name, Variable::Value(value)))
                    .collect(),
            }),
            _ => None,
        }
    }

    /// Snapshot of the namespace as a JSON object.
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .variables
            .iter()
            .map(|(name, variable)| (name.clone(), variable.to_value()))
            .collect();
        Value::Object(map)
    }
}
