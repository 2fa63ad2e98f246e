use serde_json::Value;

use crate::{content::ContentBinding, namespace::Namespace};

use super::{
    CliError,
    types::{Argument, Arguments, ContentHandler, HandlerResult, PlainHandler},
};

/// What a command does with the cell body.
#[derive(Debug)]
pub(crate) enum CommandKind {
    /// No content accepted; the handler receives arguments and namespace.
    Plain(HandlerSlot<PlainHandler>),

    /// Content is required and bound before the handler is called.
    Bound {
        binding: ContentBinding,
        handler: HandlerSlot<ContentHandler>,
    },
}

pub(crate) struct HandlerSlot<H>(pub(crate) H);

impl<H> std::fmt::Debug for HandlerSlot<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<handler>")
    }
}

/// A leaf of the command tree.
///
/// Commands are created through [`CommandGroup::add_command`] or
/// [`CommandGroup::add_content_command`]; the returned handle is used to
/// declare the command's arguments.
#[derive(Debug)]
pub struct Command {
    name: String,
    help: Option<String>,
    arguments: Vec<Argument>,
    kind: CommandKind,
}

impl Command {
    /// Declares an argument. A later argument with the same name replaces the
    /// earlier one.
    pub fn add_argument(&mut self, argument: Argument) -> &mut Self {
        upsert(&mut self.arguments, argument);
        self
    }

    /// The command's name within its group.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line description shown in listings and help.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Declared arguments, in declaration order.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// The content binding, if the command accepts a cell body.
    pub fn content(&self) -> Option<&ContentBinding> {
        match &self.kind {
            CommandKind::Plain(_) => None,
            CommandKind::Bound { binding, .. } => Some(binding),
        }
    }

    pub(crate) fn kind(&self) -> &CommandKind {
        &self.kind
    }
}

/// A named container of commands and nested groups.
///
/// Arguments declared on a group are parsed before the subcommand name and
/// end up in the same flat [`Arguments`] the handler receives.
///
/// # Example Structure
///
/// ```text
/// nbcli
/// ├── hello
/// └── foo  [--environment env]
///     ├── create   (content: YAML)
///     └── delete   --name name
/// ```
#[derive(Debug)]
pub struct CommandGroup {
    name: String,
    help: Option<String>,
    arguments: Vec<Argument>,
    commands: Vec<Command>,
    groups: Vec<CommandGroup>,
}

/// A child of a group, as seen by the parser.
pub(crate) enum Entry<'a> {
    Command(&'a Command),
    Group(&'a CommandGroup),
}

impl CommandGroup {
    pub(crate) fn new(name: &str, help: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            help: help.map(str::to_string),
            arguments: Vec::new(),
            commands: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Registers a command that takes no content.
    ///
    /// The handler is called as `handler(args, namespace)`.
    ///
    /// # Errors
    ///
    /// Returns `CliError::DuplicateCommand` if the group already has a
    /// command or group with this name.
    pub fn add_command<F>(
        &mut self,
        name: &str,
        handler: F,
        help: Option<&str>,
    ) -> Result<&mut Command, CliError>
    where
        F: Fn(&Arguments, &mut Namespace) -> HandlerResult + 'static,
    {
        self.insert_command(name, help, CommandKind::Plain(HandlerSlot(Box::new(handler))))
    }

    /// Registers a command whose cell body is interpreted by `content`.
    ///
    /// The handler is called as `handler(args, content, namespace)`, where
    /// `content` is the bound cell body: a string for plain-text bindings, or
    /// the expanded and validated document for structured ones.
    ///
    /// # Errors
    ///
    /// Returns `CliError::DuplicateCommand` if the group already has a
    /// command or group with this name.
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
        let kind = CommandKind::Bound {
            binding: content,
            handler: HandlerSlot(Box::new(handler)),
        };
        self.insert_command(name, help, kind)
    }

    /// Registers a nested group.
    ///
    /// # Errors
    ///
    /// Returns `CliError::DuplicateCommand` if the group already has a
    /// command or group with this name.
    pub fn add_command_group(
        &mut self,
        name: &str,
        help: Option<&str>,
    ) -> Result<&mut CommandGroup, CliError> {
        self.ensure_unique(name)?;

        let index = self.groups.len();
        self.groups.push(CommandGroup::new(name, help));
        Ok(&mut self.groups[index])
    }

    /// Declares an argument shared by every command in the group.
    pub fn add_argument(&mut self, argument: Argument) -> &mut Self {
        upsert(&mut self.arguments, argument);
        self
    }

    /// The group's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line description shown in listings and help.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Arguments shared by the group's commands.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Lists the paths of every command below this group, sorted.
    ///
    /// Paths are space-separated, relative to this group (e.g. `foo create`).
    pub fn list_commands(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .commands
            .iter()
            .map(|command| command.name.clone())
            .collect();

        for group in &self.groups {
            paths.extend(
                group
                    .list_commands()
                    .into_iter()
                    .map(|path| format!("{} {}", group.name, path)),
            );
        }

        paths.sort();
        paths
    }

    pub(crate) fn find(&self, name: &str) -> Option<Entry<'_>> {
        self.commands
            .iter()
            .find(|command| command.name == name)
            .map(Entry::Command)
            .or_else(|| {
                self.groups
                    .iter()
                    .find(|group| group.name == name)
                    .map(Entry::Group)
            })
    }

    /// Children as `(name, help)`, sorted by name.
    pub(crate) fn children(&self) -> Vec<(&str, Option<&str>)> {
        let mut children: Vec<(&str, Option<&str>)> = self
            .commands
            .iter()
            .map(|command| (command.name.as_str(), command.help()))
            .chain(self.groups.iter().map(|group| (group.name.as_str(), group.help())))
            .collect();

        children.sort_by(|a, b| a.0.cmp(b.0));
        children
    }

    fn insert_command(
        &mut self,
        name: &str,
        help: Option<&str>,
        kind: CommandKind,
    ) -> Result<&mut Command, CliError> {
        self.ensure_unique(name)?;

        let index = self.commands.len();
        self.commands.push(Command {
            name: name.to_string(),
            help: help.map(str::to_string),
            arguments: Vec::new(),
            kind,
        });
        Ok(&mut self.commands[index])
    }

    fn ensure_unique(&self, name: &str) -> Result<(), CliError> {
        if self.find(name).is_some() {
            return Err(CliError::DuplicateCommand {
                group: self.name.clone(),
                name: name.to_string(),
            });
        }

        Ok(())
    }
}

fn upsert(arguments: &mut Vec<Argument>, argument: Argument) {
    match arguments.iter_mut().find(|existing| existing.name == argument.name) {
        Some(existing) => *existing = argument,
        None => arguments.push(argument),
    }
}
