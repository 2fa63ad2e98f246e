use serde_json::{Map, Value};

use crate::cli::CliError;

use super::{Namespace, path_ops::resolve_reference};

/// Leading character that marks a string as a namespace reference.
pub const REFERENCE_SIGIL: char = '$';

/// Replaces every `$path` string inside `value` with the value it refers to.
///
/// Objects and arrays are walked recursively; keys are never expanded.
/// Strings not starting with the sigil and all other scalars are returned
/// unchanged. The namespace is only read.
///
/// # Errors
///
/// Returns `CliError::VariableNotFound` naming the first path that cannot
/// be resolved.
pub fn expand(namespace: &Namespace, value: Value) -> Result<Value, CliError> {
    match value {
        Value::Object(map) => map
            .into_iter()
            .map(|(key, value)| Ok((key, expand(namespace, value)?)))
            .collect::<Result<Map<String, Value>, CliError>>()
            .map(Value::Object),
        Value::Array(items) => items
            .into_iter()
            .map(|item| expand(namespace, item))
            .collect::<Result<Vec<Value>, CliError>>()
            .map(Value::Array),
        Value::String(text) => match text.strip_prefix(REFERENCE_SIGIL) {
            Some(path) => resolve_reference(namespace, path)
                .ok_or_else(|| CliError::VariableNotFound(path.to_string())),
            None => Ok(Value::String(text)),
        },
        other => Ok(other),
    }
}

/// Expands a list of command-line words.
pub fn expand_tokens(namespace: &Namespace, words: Vec<String>) -> Result<Vec<Value>, CliError> {
    words
        .into_iter()
        .map(|word| expand(namespace, Value::String(word)))
        .collect()
}
