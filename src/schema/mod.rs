//! JSON Schema inference and validation for structured cell content.
//!
//! Schemas are plain `serde_json::Value` documents. They are either written
//! by hand, derived from a Rust type with `schemars`, or inferred from
//! example documents by [`infer_schema`].

mod infer;
mod validate;

#[cfg(test)]
mod tests;

use std::fmt;

pub use infer::infer_schema;
pub use validate::validate;

/// The first place where a document failed to satisfy its schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Dotted location of the offending value; empty for the document root.
    pub path: String,
    /// Description of the mismatch.
    pub message: String,
}

impl SchemaViolation {
    pub(crate) fn new(path: &[String], message: impl Into<String>) -> Self {
        Self {
            path: path.join("."),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} at '{}'", self.message, self.path)
        }
    }
}

impl std::error::Error for SchemaViolation {}
