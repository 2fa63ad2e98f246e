use super::{Config, ConfigPaths};

use crate::{NbcliError, Result};

use std::{fs, path::Path};

use tracing::{debug, instrument};

impl Config {
    /// Loads configuration from `path`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `NbcliError::Io` if the file exists but cannot be read, and
    /// `NbcliError::TomlParse` if it is not valid configuration TOML.
    #[instrument]
    pub fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            debug!("No configuration file, using defaults");
            return Ok(Config::default());
        }

        let file_content = fs::read_to_string(path)?;
        toml::from_str(&file_content).map_err(|e| NbcliError::toml_parse(e, Some(path)))
    }

    /// Loads configuration from the default location.
    ///
    /// # Errors
    ///
    /// Returns `NbcliError::Config` if the default location cannot be
    /// determined, otherwise the errors of [`Config::load`].
    pub fn load_default() -> Result<Config> {
        let path = ConfigPaths::main_config().map_err(|e| NbcliError::Config(e.to_string()))?;
        Self::load(&path)
    }
}
