use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value, json};

/// Draft identifier stamped on inferred schemas.
const SCHEMA_URI: &str = "http://json-schema.org/draft-07/schema#";

/// The generalized shape of one or more observed values.
#[derive(Debug, Clone, PartialEq)]
enum Shape {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array(Option<Box<Shape>>),
    Object {
        properties: BTreeMap<String, Shape>,
        required: BTreeSet<String>,
    },
    /// Alternatives of distinct kinds, in the order they were first seen.
    Union(Vec<Shape>),
}

impl Shape {
    fn of(value: &Value) -> Self {
        match value {
            Value::Null => Shape::Null,
            Value::Bool(_) => Shape::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => Shape::Integer,
            Value::Number(_) => Shape::Number,
            Value::String(_) => Shape::String,
            Value::Array(items) => Shape::Array(
                items
                    .iter()
                    .map(Shape::of)
                    .reduce(Shape::merge)
                    .map(Box::new),
            ),
            Value::Object(map) => Shape::Object {
                properties: map
                    .iter()
                    .map(|(key, value)| (key.clone(), Shape::of(value)))
                    .collect(),
                required: map.keys().cloned().collect(),
            },
        }
    }

    /// Kinds that merge into a single shape rather than a union.
    fn kind(&self) -> &'static str {
        match self {
            Shape::Null => "null",
            Shape::Boolean => "boolean",
            Shape::Integer | Shape::Number => "number",
            Shape::String => "string",
            Shape::Array(_) => "array",
            Shape::Object { .. } => "object",
            Shape::Union(_) => "union",
        }
    }

    /// Least common generalization of two shapes.
    fn merge(self, other: Shape) -> Shape {
        match (self, other) {
            (Shape::Union(members), other) => Shape::Union(absorb(members, other)),
            (shape, Shape::Union(members)) => {
                let merged = members.into_iter().fold(vec![shape], absorb);
                Shape::Union(merged)
            }
            (Shape::Integer, Shape::Number) | (Shape::Number, Shape::Integer) => Shape::Number,
            (Shape::Array(a), Shape::Array(b)) => Shape::Array(match (a, b) {
                (Some(a), Some(b)) => Some(Box::new(a.merge(*b))),
                (a, b) => a.or(b),
            }),
            (
                Shape::Object {
                    properties: mut left,
                    required: left_required,
                },
                Shape::Object {
                    properties: right,
                    required: right_required,
                },
            ) => {
                for (key, shape) in right {
                    let merged = match left.remove(&key) {
                        Some(existing) => existing.merge(shape),
                        None => shape,
                    };
                    left.insert(key, merged);
                }

                Shape::Object {
                    properties: left,
                    required: left_required
                        .intersection(&right_required)
                        .cloned()
                        .collect(),
                }
            }
            (a, b) if a.kind() == b.kind() => a,
            (a, b) => Shape::Union(vec![a, b]),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Shape::Integer => "integer",
            other => other.kind(),
        }
    }

    fn is_scalar(&self) -> bool {
        !matches!(self, Shape::Array(_) | Shape::Object { .. } | Shape::Union(_))
    }

    fn to_schema(&self) -> Value {
        match self {
            Shape::Array(None) => json!({ "type": "array" }),
            Shape::Array(Some(items)) => json!({ "type": "array", "items": items.to_schema() }),
            Shape::Object {
                properties,
                required,
            } => {
                let mut schema = Map::new();
                schema.insert("type".to_string(), json!("object"));
                schema.insert(
                    "properties".to_string(),
                    Value::Object(
                        properties
                            .iter()
                            .map(|(key, shape)| (key.clone(), shape.to_schema()))
                            .collect(),
                    ),
                );
                if !required.is_empty() {
                    schema.insert("required".to_string(), json!(required));
                }
                Value::Object(schema)
            }
            Shape::Union(members) if members.iter().all(Shape::is_scalar) => {
                let types: Vec<&str> = members.iter().map(Shape::type_name).collect();
                json!({ "type": types })
            }
            Shape::Union(members) => {
                let alternatives: Vec<Value> = members.iter().map(Shape::to_schema).collect();
                json!({ "anyOf": alternatives })
            }
            scalar => json!({ "type": scalar.type_name() }),
        }
    }
}

/// Adds `shape` to a union, merging it with the member of the same kind.
fn absorb(mut members: Vec<Shape>, shape: Shape) -> Vec<Shape> {
    if let Shape::Union(inner) = shape {
        return inner.into_iter().fold(members, absorb);
    }

    match members.iter().position(|member| member.kind() == shape.kind()) {
        Some(index) => {
            let existing = members.remove(index);
            members.insert(index, existing.merge(shape));
        }
        None => members.push(shape),
    }
    members
}

/// Infers a schema accepting every example and their common generalization.
///
/// Object keys are unioned across examples; a key is required only if every
/// example has it. Each key's type widens to the least common supertype
/// (`integer` and `number` become `number`); unrelated types become a type
/// list, or `anyOf` when arrays or objects are involved. With no examples
/// the schema accepts anything.
///
/// ```
/// use nbcli::schema::{infer_schema, validate};
/// use serde_json::json;
///
/// let schema = infer_schema(&[json!({"name": "x"}), json!({"name": "y", "xyz": 1})]);
/// assert!(validate(&json!({"name": "a", "xyz": 2}), &schema).is_ok());
/// assert!(validate(&json!({"name": "a", "xyz": "many"}), &schema).is_err());
/// ```
pub fn infer_schema(examples: &[Value]) -> Value {
    let mut schema = examples
        .iter()
        .map(Shape::of)
        .reduce(Shape::merge)
        .map(|shape| shape.to_schema())
        .unwrap_or_else(|| json!({}));

    if let Value::Object(map) = &mut schema {
        map.insert("$schema".to_string(), json!(SCHEMA_URI));
    }

    schema
}
