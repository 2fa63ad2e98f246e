//! Configuration for the nbcli host binary.
//!
//! Settings are read from a TOML file. Every field has a default, so a
//! missing file or a partial one is always valid.

mod general;
mod loading;
mod output;
mod paths;


pub use general::{GeneralConfig, LogLevel};
pub use output::OutputConfig;
pub use paths::ConfigPaths;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Main configuration structure for nbcli.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// How help and errors are displayed.
    #[serde(default)]
    pub output: OutputConfig,
}
