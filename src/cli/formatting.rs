//! Formatting utilities for CLI output.
//!
//! Provides consistent rendering of values in messages and the ANSI styling
//! applied to help pages and errors on a console.

use serde_json::Value;

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";

    /// Red color
    pub const RED: &'static str = "\x1b[31m";
    /// Green color
    pub const GREEN: &'static str = "\x1b[32m";
    /// Yellow color
    pub const YELLOW: &'static str = "\x1b[33m";
    /// Cyan color
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Formats section headers with styling
pub fn format_header(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::CYAN, text, Colors::RESET)
}

/// Formats subheaders with styling
pub fn format_subheader(text: &str) -> String {
    format!(
        "{}{}{}{}",
        Colors::BOLD,
        Colors::YELLOW,
        text,
        Colors::RESET
    )
}

/// Formats command names with styling
pub fn format_command(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::GREEN, text, Colors::RESET)
}

/// Formats descriptions with muted styling
pub fn format_description(text: &str) -> String {
    format!("{}{}{}", Colors::DIM, text, Colors::RESET)
}

/// Formats error messages with red styling
pub fn format_error(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::RED, text, Colors::RESET)
}

/// Applies console styling to a rendered help page.
///
/// Section headers (unindented lines ending in `:`) are highlighted, the
/// usage line following `usage:` is rendered as a command, and the content
/// documentation after `content:` is dimmed.
pub fn style_help(text: &str) -> String {
    let mut styled = Vec::new();
    let mut section = "";

    for line in text.lines() {
        let is_header = !line.is_empty() && !line.starts_with(' ') && line.ends_with(':');

        let rendered = if is_header {
            section = line;
            if line == "content:" {
                format_subheader(line)
            } else {
                format_header(line)
            }
        } else if line.is_empty() {
            String::new()
        } else {
            match section {
                "usage:" => format_command(line),
                "content:" => format_description(line),
                _ => line.to_string(),
            }
        };

        styled.push(rendered);
    }

    styled.join("\n")
}

/// Formats a value for human-readable CLI messages.
///
/// Scalars render as JSON literals; arrays and objects show their size
/// rather than full contents.
///
/// # Examples
///
/// ```
/// use nbcli::cli::formatting::format_value;
/// use serde_json::json;
///
/// assert_eq!(format_value(&json!("hello")), "\"hello\"");
/// assert_eq!(format_value(&json!(42)), "42");
/// assert_eq!(format_value(&json!([1, 2, 3])), "[3]");
/// ```
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => format!("[{}]", arr.len()),
        Value::Object(map) => format!("{{{}}}", map.len()),
    }
}
