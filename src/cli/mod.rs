//! Command-line interface engine for notebook cells.
//!
//! Turns a cell (a command line plus an optional body) into a parsed
//! argument set and a bound content value, then dispatches to the handler
//! registered for the resolved command. Commands are organized in groups
//! and automatically generate help text from their declarations.

pub mod formatting;
mod help;
mod output;
mod parser;
mod reassemble;
mod registry;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use output::{ConsoleOutput, Output, RecordingOutput};
pub use reassemble::{CONTINUATION, Reassembled, reassemble};
pub use registry::{Command, CommandGroup};
pub use service::{CommandLineInterface, ModuleLoader};
pub use types::{
    ArgKind, ArgType, Argument, Arguments, CliError, HandlerError, HandlerResult, Outcome,
};
