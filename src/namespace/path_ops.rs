use serde_json::Value;
use tracing::debug;

use super::{Module, Namespace, Variable};

/// A position reached while walking a dotted reference path.
#[derive(Clone, Copy)]
enum Node<'a> {
    Scope(&'a Namespace),
    Module(&'a Module),
    Value(&'a Value),
}

impl<'a> Node<'a> {
    fn from_variable(variable: &'a Variable) -> Self {
        match variable {
            Variable::Value(value) => Node::Value(value),
            Variable::Module(module) => Node::Module(module),
        }
    }

    /// Mapping capability: the namespace itself and JSON objects.
    fn key(self, key: &str) -> Option<Node<'a>> {
        match self {
            Node::Scope(namespace) => namespace.get(key).map(Node::from_variable),
            Node::Value(Value::Object(map)) => map.get(key).map(Node::Value),
            _ => None,
        }
    }

    /// Attribute capability: module-like objects.
    fn attribute(self, name: &str) -> Option<Node<'a>> {
        match self {
            Node::Module(module) => module.attribute(name).map(Node::from_variable),
            _ => None,
        }
    }

    fn to_value(self) -> Value {
        match self {
            Node::Scope(namespace) => namespace.to_value(),
            Node::Module(module) => module.to_value(),
            Node::Value(value) => value.clone(),
        }
    }
}

/// Resolves a dotted path (without the `$` sigil) against the namespace.
///
/// Each segment is tried as a mapping key first, then as a module attribute.
/// Returns `None` as soon as a segment cannot be resolved. Sequences are not
/// indexed.
pub fn resolve_reference(namespace: &Namespace, path: &str) -> Option<Value> {
    let mut current = Node::Scope(namespace);

    for (i, segment) in path.split('.').enumerate() {
        current = match current.key(segment).or_else(|| current.attribute(segment)) {
            Some(next) => next,
            None => {
                debug!(
                    "Segment '{}' not found at path '{}'",
                    segment,
                    path.split('.').take(i).collect::<Vec<_>>().join(".")
                );
                return None;
            }
        };
    }

    Some(current.to_value())
}
