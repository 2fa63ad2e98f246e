use std::path::Path;

use thiserror::Error;

/// Errors raised outside the command engine: configuration, namespace
/// files and I/O performed by the host binary.
#[derive(Error, Debug)]
pub enum NbcliError {
    /// Configuration could not be resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Standard I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failure, with location context already rendered.
    #[error("{0}")]
    TomlParse(String),

    /// A namespace file could not be read or has the wrong shape.
    #[error("Namespace error: {0}")]
    Namespace(String),
}

/// Result alias for host-level operations.
pub type Result<T> = std::result::Result<T, NbcliError>;

impl NbcliError {
    /// Creates a TOML parsing error with optional file path context.
    pub fn toml_parse(error: impl std::fmt::Display, path: Option<&Path>) -> Self {
        match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                NbcliError::TomlParse(format!(
                    "Failed to parse TOML at {:?}: {}",
                    clean_path, error
                ))
            }
            None => NbcliError::TomlParse(format!("Failed to parse TOML: {}", error)),
        }
    }

    /// Creates a namespace error for a file that could not be loaded.
    pub fn namespace(error: impl std::fmt::Display, path: &Path) -> Self {
        let clean_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        NbcliError::Namespace(format!(
            "Failed to load namespace from {:?}: {}",
            clean_path, error
        ))
    }
}
