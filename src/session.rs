//! Host adapter binding an interface to a notebook session.
//!
//! A notebook registers an interface under its name, once as a line magic
//! (`%name args`) and once as a cell magic (`%%name args` followed by the
//! body). [`Session`] plays that host: it owns the namespace and routes each
//! submission into [`CommandLineInterface::execute`].

use tracing::debug;

use crate::{
    cli::{CommandLineInterface, HandlerError, Outcome},
    namespace::Namespace,
};

/// An interface paired with the namespace its commands run against.
pub struct Session {
    cli: CommandLineInterface,
    namespace: Namespace,
}

impl Session {
    /// Starts a session over an existing namespace.
    pub fn new(cli: CommandLineInterface, namespace: Namespace) -> Self {
        Self { cli, namespace }
    }

    /// The interface commands are dispatched to.
    pub fn cli(&self) -> &CommandLineInterface {
        &self.cli
    }

    /// The session's variables.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Mutable access to the session's variables.
    pub fn namespace_mut(&mut self) -> &mut Namespace {
        &mut self.namespace
    }

    /// Ends the session, handing back its variables.
    pub fn into_namespace(self) -> Namespace {
        self.namespace
    }

    /// Runs a single line with no content.
    ///
    /// A blank line is ignored without being parsed.
    ///
    /// # Errors
    ///
    /// Returns the handler's fault, if it raised one.
    pub fn run_line(&mut self, line: &str) -> Result<Outcome, HandlerError> {
        let line = self.strip_magic(line);
        if line.trim().is_empty() {
            debug!("Ignoring blank line");
            return Ok(Outcome::Ignored);
        }

        self.cli.execute(line, "", &mut self.namespace)
    }

    /// Runs a whole cell: the first line is the command line and the rest
    /// is the body.
    ///
    /// The first line may start with the interface's magic marker, as in
    /// `%%nbcli foo create`.
    ///
    /// # Errors
    ///
    /// Returns the handler's fault, if it raised one.
    pub fn run_cell(&mut self, cell: &str) -> Result<Outcome, HandlerError> {
        let (first, body) = cell.split_once('\n').unwrap_or((cell, ""));
        let line = self.strip_magic(first);
        if line.trim().is_empty() && body.trim().is_empty() {
            debug!("Ignoring empty cell");
            return Ok(Outcome::Ignored);
        }

        self.cli.execute(line, body, &mut self.namespace)
    }

    /// Removes a leading `%name` or `%%name` naming this interface.
    fn strip_magic<'a>(&self, line: &'a str) -> &'a str {
        let trimmed = line.trim_start();
        let Some(marked) = trimmed
            .strip_prefix("%%")
            .or_else(|| trimmed.strip_prefix('%'))
        else {
            return line;
        };

        let name = self.cli.name();
        match marked.strip_prefix(name) {
            Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
                rest.trim_start()
            }
            _ => line,
        }
    }
}
