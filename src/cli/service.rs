use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::{content::ContentBinding, namespace::Namespace};

use super::{
    CliError, Outcome,
    output::{ConsoleOutput, Output},
    parser::{ParseOutcome, parse, tokenize},
    reassemble::{Reassembled, reassemble},
    registry::{Command, CommandGroup, CommandKind},
    types::{Argument, Arguments, HandlerError, HandlerResult},
};

/// A function that adds command groups and commands to an interface.
pub type ModuleLoader = fn(&mut CommandLineInterface) -> Result<(), CliError>;

/// A command-line interface executed one cell at a time.
///
/// The interface is itself the root command group. Each execution runs
/// reassembly, parsing, content binding and dispatch to completion; nothing
/// is retained between executions except what handlers write into the
/// namespace.
///
/// ```
/// use nbcli::{cli::{CommandLineInterface, Outcome, RecordingOutput}, namespace::Namespace};
///
/// let mut cli = CommandLineInterface::new("demo", None).with_output(RecordingOutput::default());
/// cli.add_command("hello", |_, _| Ok(()), Some("Says hello")).unwrap();
///
/// let mut ns = Namespace::new();
/// assert_eq!(cli.execute("hello", "", &mut ns).unwrap(), Outcome::Dispatched);
/// ```
pub struct CommandLineInterface {
    root: CommandGroup,
    output: Box<dyn Output>,
    magic_prefix: String,
}

impl CommandLineInterface {
    /// Prefix shown before the program name in usage lines.
    pub const DEFAULT_MAGIC_PREFIX: &'static str = "%";

    /// Creates an empty interface reporting to the console.
    pub fn new(name: &str, description: Option<&str>) -> Self {
        Self {
            root: CommandGroup::new(name, description),
            output: Box::new(ConsoleOutput::default()),
            magic_prefix: Self::DEFAULT_MAGIC_PREFIX.to_string(),
        }
    }

    /// Creates an interface and lets each module register its commands.
    ///
    /// # Errors
    ///
    /// Returns the first registration error raised by a module.
    pub fn from_modules(
        name: &str,
        modules: &[ModuleLoader],
        description: Option<&str>,
    ) -> Result<Self, CliError> {
        let mut cli = Self::new(name, description);
        for load in modules {
            load(&mut cli)?;
        }

        debug!(commands = ?cli.root.list_commands(), "Loaded command modules");
        Ok(cli)
    }

    /// Replaces the channels help and errors are reported on.
    pub fn with_output(mut self, output: impl Output + 'static) -> Self {
        self.output = Box::new(output);
        self
    }

    /// Replaces the prefix shown before the program name in usage lines.
    pub fn with_magic_prefix(mut self, prefix: &str) -> Self {
        self.magic_prefix = prefix.to_string();
        self
    }

    /// The interface's name, which is also the magic name hosts bind it to.
    pub fn name(&self) -> &str {
        self.root.name()
    }

    /// The root of the command tree.
    pub fn root(&self) -> &CommandGroup {
        &self.root
    }

    /// Registers a top-level command that takes no content.
    ///
    /// # Errors
    ///
    /// Returns `CliError::DuplicateCommand` if the name is taken.
    pub fn add_command<F>(
        &mut self,
        name: &str,
        handler: F,
        help: Option<&str>,
    ) -> Result<&mut Command, CliError>
    where
        F: Fn(&Arguments, &mut Namespace) -> HandlerResult + 'static,
    {
        self.root.add_command(name, handler, help)
    }

    /// Registers a top-level command whose cell body is bound by `content`.
    ///
    /// # Errors
    ///
    /// Returns `CliError::DuplicateCommand` if the name is taken.
    pub fn add_content_command<F>(
        &mut self,
        name: &str,
        handler: F,
        content: ContentBinding,
        help: Option<&str>,
    ) -> Result<&mut Command, CliError>
    where
        F: Fn(&Arguments, Value, &mut Namespace) -> HandlerResult + 'static,
    {
        self.root.add_content_command(name, handler, content, help)
    }

    /// Registers a top-level command group.
    ///
    /// # Errors
    ///
    /// Returns `CliError::DuplicateCommand` if the name is taken.
    pub fn add_command_group(
        &mut self,
        name: &str,
        help: Option<&str>,
    ) -> Result<&mut CommandGroup, CliError> {
        self.root.add_command_group(name, help)
    }

    /// Declares an argument accepted before any command name.
    pub fn add_argument(&mut self, argument: Argument) -> &mut Self {
        self.root.add_argument(argument);
        self
    }

    /// Parses and executes a command in the context of a namespace.
    ///
    /// `line` is the command line and `cell` the rest of the cell (empty for
    /// the single-line form). Help and engine failures are reported on the
    /// output channels and returned as the matching [`Outcome`].
    ///
    /// # Errors
    ///
    /// Only faults raised by the handler itself are returned as errors; they
    /// are passed through untouched.
    #[instrument(skip(self, cell, namespace), fields(interface = %self.root.name()))]
    pub fn execute(
        &self,
        line: &str,
        cell: &str,
        namespace: &mut Namespace,
    ) -> Result<Outcome, HandlerError> {
        let Reassembled { line, content } = reassemble(line, cell);
        debug!(%line, content_bytes = content.len(), "Reassembled cell");

        let parsed = tokenize(&line, namespace)
            .and_then(|tokens| parse(&self.root, tokens, &self.magic_prefix));

        let invocation = match parsed {
            Ok(ParseOutcome::Command(invocation)) => invocation,
            Ok(ParseOutcome::Help(page)) => {
                self.output.page(&page);
                return Ok(Outcome::HelpShown);
            }
            Err(error) => return Ok(self.reject(error, Outcome::ParseFailed)),
        };

        let command = invocation.path.join(" ");
        let has_content = !content.trim().is_empty();

        match invocation.command.kind() {
            CommandKind::Plain(handler) => {
                if has_content {
                    return Ok(self.reject(CliError::ContentNotSupported, Outcome::ContentFailed));
                }

                info!(%command, "Dispatching command");
                (handler.0)(&invocation.arguments, namespace)?;
            }
            CommandKind::Bound { binding, handler } => {
                if !has_content {
                    return Ok(self.reject(CliError::ContentRequired, Outcome::ContentFailed));
                }

                let bound = match binding.parse(&content, namespace) {
                    Ok(bound) => bound,
                    Err(error) => return Ok(self.reject(error, Outcome::ContentFailed)),
                };

                info!(%command, "Dispatching command with content");
                (handler.0)(&invocation.arguments, bound, namespace)?;
            }
        }

        Ok(Outcome::Dispatched)
    }

    fn reject(&self, error: CliError, state: fn(CliError) -> Outcome) -> Outcome {
        warn!(%error, "Command rejected");
        self.output.error(&error.to_string());
        state(error)
    }
}
