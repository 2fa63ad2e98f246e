use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::cli::CommandLineInterface;

/// How help pages and error messages are displayed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct OutputConfig {
    /// Whether help and errors are styled with ANSI colors.
    #[serde(default = "default_color")]
    pub color: bool,

    /// Prefix printed before the program name in usage lines (e.g. "%" or "%%").
    #[serde(default = "default_magic_prefix")]
    pub magic_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            magic_prefix: default_magic_prefix(),
        }
    }
}

fn default_color() -> bool {
    true
}

fn default_magic_prefix() -> String {
    CommandLineInterface::DEFAULT_MAGIC_PREFIX.to_string()
}
