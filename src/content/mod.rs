//! Interpretation of a cell's body for commands that accept content.
//!
//! A binding is either plain text, passed to the handler verbatim, or a
//! YAML document that is expanded against the namespace and validated
//! against a schema before the handler sees it.


use schemars::JsonSchema;
use serde_json::Value;
use tracing::debug;

use crate::{
    cli::CliError,
    namespace::{Namespace, expand},
    schema::{infer_schema, validate},
};

/// Where a structured binding's schema comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaSource {
    /// Any well-formed document is accepted.
    None,
    /// Representative documents the schema is inferred from.
    Examples(Vec<Value>),
    /// An explicit JSON schema.
    Schema(Value),
}

/// Describes the structured content a command expects.
///
/// The description is shown under `content:` in the command's help.
///
/// ```
/// use nbcli::content::{ContentBinding, ContentSpec, SchemaSource};
/// use serde_json::json;
///
/// struct WidgetSpec;
///
/// impl ContentSpec for WidgetSpec {
///     fn description(&self) -> &str {
///         "name: the widget's name"
///     }
///
///     fn schema(&self) -> SchemaSource {
///         SchemaSource::Examples(vec![json!({"name": "w"})])
///     }
/// }
///
/// let binding = ContentBinding::from_spec(&WidgetSpec);
/// assert_eq!(binding.doc(), "name: the widget's name");
/// assert!(binding.schema().is_some());
/// ```
pub trait ContentSpec {
    /// Documentation of the expected document.
    fn description(&self) -> &str;

    /// Schema the document is validated against.
    fn schema(&self) -> SchemaSource;
}

/// How a command interprets its cell body.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBinding {
    /// The body is passed through as a string.
    PlainText {
        /// Documentation of the expected text.
        doc: String,
    },
    /// The body is a YAML document, expanded then validated.
    Structured(StructuredContent),
}

/// A YAML binding and the schema it validates against.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredContent {
    doc: String,
    schema: Option<Value>,
}

impl ContentBinding {
    /// A plain-text binding documented by `doc`.
    pub fn text(doc: &str) -> Self {
        ContentBinding::PlainText {
            doc: clean_doc(doc),
        }
    }

    /// A structured binding with the given schema source.
    pub fn structured(doc: &str, source: SchemaSource) -> Self {
        let schema = match source {
            SchemaSource::None => None,
            SchemaSource::Examples(examples) => Some(infer_schema(&examples)),
            SchemaSource::Schema(schema) => Some(schema),
        };

        ContentBinding::Structured(StructuredContent {
            doc: clean_doc(doc),
            schema,
        })
    }

    /// A structured binding described by a [`ContentSpec`].
    pub fn from_spec<S: ContentSpec + ?Sized>(spec: &S) -> Self {
        Self::structured(spec.description(), spec.schema())
    }

    /// A structured binding whose schema is derived from `T`.
    ///
    /// The documentation is taken from the type's doc comment, or its title
    /// when it has none.
    pub fn from_type<T: JsonSchema>() -> Self {
        let schema = schemars::schema_for!(T);
        let value = schema.as_value().clone();

        let doc = ["description", "title"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str))
            .unwrap_or_default()
            .to_string();

        Self::structured(&doc, SchemaSource::Schema(value))
    }

    /// Documentation shown under `content:` in help.
    pub fn doc(&self) -> &str {
        match self {
            ContentBinding::PlainText { doc } => doc,
            ContentBinding::Structured(structured) => &structured.doc,
        }
    }

    /// The schema structured content is validated against, if any.
    pub fn schema(&self) -> Option<&Value> {
        match self {
            ContentBinding::PlainText { .. } => None,
            ContentBinding::Structured(structured) => structured.schema.as_ref(),
        }
    }

    /// Binds a cell body.
    ///
    /// Plain text is returned as a string without expansion. Structured
    /// content is parsed as YAML, its `$` references expanded, and the
    /// result validated against the schema.
    ///
    /// # Errors
    ///
    /// * `CliError::InvalidContent` - The body is not valid YAML
    /// * `CliError::VariableNotFound` - A reference could not be resolved
    /// * `CliError::SchemaViolation` - The expanded document fails validation
    pub fn parse(&self, cell: &str, namespace: &Namespace) -> Result<Value, CliError> {
        match self {
            ContentBinding::PlainText { .. } => Ok(Value::String(cell.to_string())),
            ContentBinding::Structured(structured) => structured.parse(cell, namespace),
        }
    }
}

impl StructuredContent {
    fn parse(&self, cell: &str, namespace: &Namespace) -> Result<Value, CliError> {
        let document: Value =
            serde_yaml::from_str(cell).map_err(|e| CliError::InvalidContent(e.to_string()))?;
        let content = expand(namespace, document)?;

        if let Some(schema) = &self.schema {
            validate(&content, schema)?;
            debug!("Content satisfies schema");
        }

        Ok(content)
    }
}

/// Trims a documentation string and removes the indentation common to its
/// continuation lines, so indented raw strings read naturally in help.
fn clean_doc(doc: &str) -> String {
    let mut lines = doc.trim().lines();
    let Some(first) = lines.next() else {
        return String::new();
    };

    let rest: Vec<&str> = lines.collect();
    let indent = rest
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut cleaned = vec![first.trim_end().to_string()];
    cleaned.extend(rest.iter().map(|line| {
        line.get(indent..)
            .map(str::trim_end)
            .unwrap_or_else(|| line.trim())
            .to_string()
    }));

    cleaned.join("\n")
}
