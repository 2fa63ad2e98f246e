use std::{fs, path::Path};

use serde_json::Value;
use tracing::{debug, instrument};

use crate::{NbcliError, Result};

use super::Namespace;

impl Namespace {
    /// Loads an initial namespace from a JSON, TOML or YAML file.
    ///
    /// The format is chosen by extension (`json`, `toml`, `yaml`/`yml`) and
    /// the document's top level must be a mapping.
    ///
    /// # Errors
    ///
    /// Returns `NbcliError::Io` if the file cannot be read and
    /// `NbcliError::Namespace` for unsupported extensions, parse failures or
    /// a top level that is not a mapping.
    #[instrument]
    pub fn load(path: &Path) -> Result<Namespace> {
        let content = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .unwrap_or_default()
            .to_lowercase();

        let value: Value = match extension.as_str() {
            "json" => serde_json::from_str(&content).map_err(|e| NbcliError::namespace(e, path))?,
            "toml" => {
                let table: toml::Value = toml::from_str(&content)
                    .map_err(|e| NbcliError::toml_parse(e, Some(path)))?;
                serde_json::to_value(table).map_err(|e| NbcliError::namespace(e, path))?
            }
            "yaml" | "yml" => {
                serde_yaml::from_str(&content).map_err(|e| NbcliError::namespace(e, path))?
            }
            other => {
                return Err(NbcliError::namespace(
                    format!("unsupported file extension '{other}'"),
                    path,
                ));
            }
        };

        let namespace = Namespace::from_value(value)
            .ok_or_else(|| NbcliError::namespace("top level must be a mapping", path))?;
        debug!(variables = namespace.len(), "Loaded namespace");

        Ok(namespace)
    }
}
