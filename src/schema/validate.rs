use std::collections::HashSet;

use serde_json::{Map, Value};

use super::SchemaViolation;

/// Keywords whose subschemas apply to the same instance location.
const IN_PLACE_LISTS: [&str; 3] = ["allOf", "anyOf", "oneOf"];
const IN_PLACE_SINGLE: [&str; 4] = ["not", "if", "then", "else"];

/// Keywords holding data rather than subschemas.
const DATA_KEYWORDS: [&str; 4] = ["enum", "const", "examples", "default"];

/// Validates `instance` against `schema`, reporting the first violation.
///
/// Validation is delegated to the `jsonschema` crate, so every keyword of
/// the schema's draft is enforced (2020-12 when the schema does not name
/// one). Schemas whose references loop back to the same location without
/// descending into the document are rejected up front.
///
/// # Errors
///
/// Returns the location and description of the first mismatch found, or a
/// root-level violation when the schema itself cannot be compiled.
pub fn validate(instance: &Value, schema: &Value) -> Result<(), SchemaViolation> {
    if let Some(pointer) = reference_cycle(schema) {
        return Err(SchemaViolation::new(
            &[],
            format!("schema reference cycle at '#{pointer}'"),
        ));
    }

    let validator = jsonschema::validator_for(schema)
        .map_err(|e| SchemaViolation::new(&[], format!("invalid schema: {e}")))?;

    match validator.iter_errors(instance).next() {
        Some(error) => {
            let location = pointer_segments(&error.instance_path.to_string());
            Err(SchemaViolation::new(&location, error.to_string()))
        }
        None => Ok(()),
    }
}

/// Splits a JSON pointer into unescaped segments.
fn pointer_segments(pointer: &str) -> Vec<String> {
    pointer
        .split('/')
        .skip(1)
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect()
}

fn escape_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Finds a subschema that reaches itself through `$ref` and in-place
/// applicators only. Returns its JSON pointer.
fn reference_cycle(root: &Value) -> Option<String> {
    let mut nodes = Vec::new();
    collect_nodes(root, String::new(), &mut nodes);

    let mut done = HashSet::new();
    let mut active = Vec::new();
    nodes
        .iter()
        .find_map(|pointer| visit(root, pointer, &mut active, &mut done))
}

fn collect_nodes(value: &Value, pointer: String, nodes: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if !DATA_KEYWORDS.contains(&key.as_str()) {
                    collect_nodes(child, format!("{pointer}/{}", escape_segment(key)), nodes);
                }
            }
            nodes.push(pointer);
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                collect_nodes(child, format!("{pointer}/{index}"), nodes);
            }
        }
        _ => {}
    }
}

fn visit(
    root: &Value,
    pointer: &str,
    active: &mut Vec<String>,
    done: &mut HashSet<String>,
) -> Option<String> {
    if done.contains(pointer) {
        return None;
    }
    if active.iter().any(|seen| seen == pointer) {
        return Some(pointer.to_string());
    }

    let Some(Value::Object(keywords)) = root.pointer(pointer) else {
        done.insert(pointer.to_string());
        return None;
    };

    active.push(pointer.to_string());
    for next in in_place_children(pointer, keywords) {
        if let Some(cycle) = visit(root, &next, active, done) {
            return Some(cycle);
        }
    }
    active.pop();

    done.insert(pointer.to_string());
    None
}

fn in_place_children(pointer: &str, keywords: &Map<String, Value>) -> Vec<String> {
    let mut children = Vec::new();

    if let Some(target) = keywords
        .get("$ref")
        .and_then(Value::as_str)
        .and_then(|reference| reference.strip_prefix('#'))
    {
        children.push(target.to_string());
    }

    for keyword in IN_PLACE_LISTS {
        if let Some(Value::Array(schemas)) = keywords.get(keyword) {
            children.extend((0..schemas.len()).map(|index| format!("{pointer}/{keyword}/{index}")));
        }
    }

    for keyword in IN_PLACE_SINGLE {
        if keywords.contains_key(keyword) {
            children.push(format!("{pointer}/{keyword}"));
        }
    }

    children
}
