//! nbcli - Command-line interfaces for notebook cells.
//!
//! A cell's first line is a command line; the rest of the cell is the
//! command's content. nbcli reassembles continued lines, expands `$`
//! references against the notebook's namespace, parses arguments against
//! a tree of command groups, binds the content (as plain text or as YAML
//! validated against a schema) and dispatches to the registered handler.
//!
//! # Quick Start
//!
//! ```rust
//! use nbcli::{
//!     cli::{CommandLineInterface, Outcome, RecordingOutput},
//!     namespace::Namespace,
//! };
//!
//! let mut cli = CommandLineInterface::new("nbcli", None).with_output(RecordingOutput::default());
//! cli.add_command(
//!     "greet",
//!     |_, namespace| {
//!         namespace.insert("greeted", true);
//!         Ok(())
//!     },
//!     Some("Leaves a mark in the namespace"),
//! )
//! .unwrap();
//!
//! let mut namespace = Namespace::new();
//! assert_eq!(cli.execute("greet", "", &mut namespace).unwrap(), Outcome::Dispatched);
//! assert_eq!(namespace.value("greeted"), Some(&serde_json::json!(true)));
//! ```

/// Command engine: reassembly, parsing, help and dispatch.
pub mod cli;

/// Host binary configuration.
pub mod config;

/// Binding of cell bodies to plain text or validated YAML.
pub mod content;

/// Core error types and result aliases.
pub mod core;

/// Variables visible to command lines and content.
pub mod namespace;

/// Schema inference and validation for structured content.
pub mod schema;

/// Built-in command modules.
pub mod sample;

/// Line and cell magics bound to an interface.
pub mod session;

/// Logging setup for the host binary.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use crate::core::{NbcliError, Result};
