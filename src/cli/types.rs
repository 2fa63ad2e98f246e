use std::{collections::BTreeMap, error::Error, fmt};

use serde_json::Value;
use thiserror::Error;

use crate::{cli::formatting::format_value, namespace::Namespace, schema::SchemaViolation};

/// Errors the engine reports while turning a cell into a dispatch call.
///
/// None of these terminate the host. The interface renders them as a single
/// message on the error channel and aborts the current execution without
/// invoking a handler. [`CliError::DuplicateCommand`] is the exception: it is
/// raised while commands are being registered.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CliError {
    /// The argument line does not match the command grammar.
    ///
    /// Covers unknown commands and flags, missing required arguments,
    /// values that cannot be coerced to the declared type and unbalanced
    /// shell quoting.
    #[error("{0}")]
    Grammar(String),

    /// The command declares a content binding but the cell body is blank.
    #[error("Content must be specified for this command.")]
    ContentRequired,

    /// The command declares no content binding but the cell body is not blank.
    #[error("Content is not supported for this command.")]
    ContentNotSupported,

    /// A `$` reference could not be resolved against the namespace.
    #[error("Unable to find a valid value for \"{0}\".")]
    VariableNotFound(String),

    /// The cell body is not a well-formed YAML document.
    #[error("Invalid content: {0}")]
    InvalidContent(String),

    /// The expanded cell body does not satisfy the command's schema.
    #[error("Content does not match the expected schema: {0}")]
    SchemaViolation(#[from] SchemaViolation),

    /// A command or group with the same name already exists in the group.
    #[error("Command '{name}' is already registered in '{group}'")]
    DuplicateCommand {
        /// Name of the enclosing group.
        group: String,
        /// The conflicting name.
        name: String,
    },
}

/// Error type handlers return. Handler faults are never caught by the engine.
pub type HandlerError = Box<dyn Error + Send + Sync>;

/// Result type returned by command handlers.
pub type HandlerResult = Result<(), HandlerError>;

/// The terminal state reached by one execution.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The handler ran to completion.
    Dispatched,

    /// Help was requested and rendered; no handler ran.
    HelpShown,

    /// The argument line was rejected; the error has been reported.
    ParseFailed(CliError),

    /// The cell body was rejected; the error has been reported.
    ContentFailed(CliError),

    /// There was nothing to execute.
    Ignored,
}

impl Outcome {
    /// Whether the execution ended in a reported failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::ParseFailed(_) | Outcome::ContentFailed(_))
    }
}

/// Type classification for command arguments.
///
/// Tokens are coerced to the declared type after variable expansion, so a
/// reference that resolved to a non-string value is checked directly rather
/// than parsed from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgType {
    /// Any value, passed through untouched.
    #[default]
    Value,

    /// A string. Numbers and booleans are rendered as text.
    String,

    /// A signed integer.
    Integer,

    /// A numeric value (integer or float).
    Number,

    /// A boolean value (true/false, yes/no, on/off, 1/0).
    Boolean,
}

impl ArgType {
    /// Name used in coercion error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ArgType::Value => "value",
            ArgType::String => "str",
            ArgType::Integer => "int",
            ArgType::Number => "float",
            ArgType::Boolean => "bool",
        }
    }

    pub(crate) fn coerce(&self, value: Value) -> Result<Value, Value> {
        match (self, value) {
            (ArgType::Value, value) => Ok(value),

            (ArgType::String, value @ Value::String(_)) => Ok(value),
            (ArgType::String, Value::Number(n)) => Ok(Value::String(n.to_string())),
            (ArgType::String, Value::Bool(b)) => Ok(Value::String(b.to_string())),

            (ArgType::Integer, Value::String(s)) => {
                s.trim().parse::<i64>().map(Value::from).map_err(|_| Value::String(s))
            }
            (ArgType::Integer, Value::Number(n)) if n.is_i64() => Ok(Value::Number(n)),

            (ArgType::Number, Value::String(s)) => match s.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(Value::from(f)),
                _ => Err(Value::String(s)),
            },
            (ArgType::Number, value @ Value::Number(_)) => Ok(value),

            (ArgType::Boolean, Value::String(s)) => match s.trim().to_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(Value::Bool(true)),
                "false" | "no" | "off" | "0" => Ok(Value::Bool(false)),
                _ => Err(Value::String(s)),
            },
            (ArgType::Boolean, value @ Value::Bool(_)) => Ok(value),

            (_, value) => Err(value),
        }
    }
}

/// How an argument is matched on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgKind {
    /// `--long VALUE`, `--long=VALUE` or `-s VALUE`.
    Flag {
        /// Long option string, including the leading dashes.
        long: String,
        /// Optional single-character short option.
        short: Option<char>,
    },

    /// `--long` alone sets the value to `true`; absent means `false`.
    Switch {
        /// Long option string, including the leading dashes.
        long: String,
        /// Optional single-character short option.
        short: Option<char>,
    },

    /// Matched by position among non-option tokens.
    Positional,
}

/// Specification for a single command or group argument.
///
/// ```
/// use nbcli::cli::{ArgType, Argument};
///
/// let name = Argument::flag("name")
///     .metavar("name")
///     .required(true)
///     .value_type(ArgType::String)
///     .help("The name of the resource");
/// assert_eq!(name.name(), "name");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub(crate) name: String,
    pub(crate) kind: ArgKind,
    pub(crate) help: Option<String>,
    pub(crate) metavar: Option<String>,
    pub(crate) required: bool,
    pub(crate) value_type: ArgType,
    pub(crate) default: Option<Value>,
    pub(crate) choices: Vec<Value>,
}

impl Argument {
    fn new(name: &str, kind: ArgKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            kind,
            help: None,
            metavar: None,
            required,
            value_type: ArgType::default(),
            default: None,
            choices: Vec::new(),
        }
    }

    /// An option taking one value, spelled `--name` (underscores become dashes).
    pub fn flag(name: &str) -> Self {
        let long = format!("--{}", name.replace('_', "-"));
        Self::new(name, ArgKind::Flag { long, short: None }, false)
    }

    /// A boolean option, `true` when present.
    pub fn switch(name: &str) -> Self {
        let long = format!("--{}", name.replace('_', "-"));
        Self::new(name, ArgKind::Switch { long, short: None }, false)
            .default_value(Value::Bool(false))
    }

    /// A positional argument. Positionals are required unless marked otherwise.
    pub fn positional(name: &str) -> Self {
        Self::new(name, ArgKind::Positional, true)
    }

    /// Adds a single-character short option. Ignored for positionals.
    pub fn short(mut self, short: char) -> Self {
        match &mut self.kind {
            ArgKind::Flag { short: s, .. } | ArgKind::Switch { short: s, .. } => *s = Some(short),
            ArgKind::Positional => {}
        }
        self
    }

    /// Sets the help text shown in the options table.
    pub fn help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Sets the placeholder shown for the value in usage and help.
    pub fn metavar(mut self, metavar: &str) -> Self {
        self.metavar = Some(metavar.to_string());
        self
    }

    /// Marks the argument as required (or optional, for positionals).
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the type tokens are coerced to.
    pub fn value_type(mut self, value_type: ArgType) -> Self {
        self.value_type = value_type;
        self
    }

    /// Value used when the argument is absent.
    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Restricts accepted values, compared after coercion.
    pub fn choices<I, V>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Key under which the parsed value is stored.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How the argument is matched.
    pub fn kind(&self) -> &ArgKind {
        &self.kind
    }

    pub(crate) fn is_positional(&self) -> bool {
        matches!(self.kind, ArgKind::Positional)
    }

    pub(crate) fn matches_option(&self, option: &str) -> bool {
        match &self.kind {
            ArgKind::Flag { long, short } | ArgKind::Switch { long, short } => {
                option == long
                    || short.is_some_and(|s| option.strip_prefix('-') == Some(s.to_string().as_str()))
            }
            ArgKind::Positional => false,
        }
    }

    /// The display name used in messages: `--long` for options, the metavar
    /// or name for positionals.
    pub(crate) fn display_name(&self) -> String {
        match &self.kind {
            ArgKind::Flag { long, .. } | ArgKind::Switch { long, .. } => long.clone(),
            ArgKind::Positional => self.value_name(),
        }
    }

    pub(crate) fn value_name(&self) -> String {
        self.metavar.clone().unwrap_or_else(|| match self.kind {
            ArgKind::Positional => self.name.clone(),
            _ => self.name.to_uppercase(),
        })
    }

    pub(crate) fn accept(&self, value: Value) -> Result<Value, CliError> {
        let value = self.value_type.coerce(value).map_err(|rejected| {
            CliError::Grammar(format!(
                "argument {}: invalid {} value: {}",
                self.display_name(),
                self.value_type.name(),
                format_value(&rejected)
            ))
        })?;

        if !self.choices.is_empty() && !self.choices.contains(&value) {
            let choices: Vec<String> = self.choices.iter().map(format_value).collect();
            return Err(CliError::Grammar(format!(
                "argument {}: invalid choice: {} (choose from {})",
                self.display_name(),
                format_value(&value),
                choices.join(", ")
            )));
        }

        Ok(value)
    }
}

/// Flat mapping of argument names to parsed values for one invocation.
///
/// Every argument declared along the resolved command path is present:
/// absent options hold their default, or `null` when none was declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: BTreeMap<String, Value>,
}

impl Arguments {
    /// Returns the value stored for `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns the value for `name` if it is a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Returns the value for `name` if it is an integer.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// Returns the value for `name` if it is numeric.
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    /// Returns the value for `name` if it is a boolean.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Whether a value (possibly `null`) is stored for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of stored arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no arguments are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over arguments in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Converts the arguments into a JSON object.
    pub fn into_value(self) -> Value {
        Value::Object(self.values.into_iter().collect())
    }

    pub(crate) fn insert(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .values
            .iter()
            .map(|(name, value)| format!("{name}={}", format_value(value)))
            .collect();
        write!(f, "{}", pairs.join(" "))
    }
}

pub(crate) type PlainHandler = Box<dyn Fn(&Arguments, &mut Namespace) -> HandlerResult>;
pub(crate) type ContentHandler = Box<dyn Fn(&Arguments, Value, &mut Namespace) -> HandlerResult>;
