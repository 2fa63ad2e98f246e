//! Usage and help rendering for groups and commands.

use crate::content::ContentBinding;

use super::types::{ArgKind, Argument};

const HELP_INVOCATION: &str = "-h, --help";
const HELP_DESCRIPTION: &str = "show this help message and exit";
const MAX_COLUMN: usize = 28;

/// Everything needed to render the help page of one level of the tree.
pub(crate) struct HelpPage<'a> {
    /// Magic prefix, program name and command path, e.g. `%nbcli foo delete`.
    pub(crate) usage_path: String,
    pub(crate) description: Option<&'a str>,
    pub(crate) arguments: &'a [Argument],
    /// Subcommands and nested groups as `(name, help)`.
    pub(crate) children: Vec<(&'a str, Option<&'a str>)>,
    pub(crate) content: Option<&'a ContentBinding>,
}

impl HelpPage<'_> {
    pub(crate) fn render(&self) -> String {
        let mut sections = vec![format!("usage:\n{}", self.usage())];

        if let Some(description) = self.description.filter(|d| !d.trim().is_empty()) {
            sections.push(description.trim().to_string());
        }

        let positionals: Vec<(String, &str)> = self
            .arguments
            .iter()
            .filter(|argument| argument.is_positional())
            .map(|argument| (argument.value_name(), argument.help.as_deref().unwrap_or("")))
            .collect();

        let mut options = vec![(HELP_INVOCATION.to_string(), HELP_DESCRIPTION)];
        options.extend(
            self.arguments
                .iter()
                .filter(|argument| !argument.is_positional())
                .map(|argument| (option_invocation(argument), argument.help.as_deref().unwrap_or(""))),
        );

        let children: Vec<(String, &str)> = self
            .children
            .iter()
            .map(|(name, help)| (name.to_string(), help.unwrap_or("")))
            .collect();

        let width = positionals
            .iter()
            .chain(options.iter())
            .chain(children.iter())
            .map(|(invocation, _)| invocation.len())
            .max()
            .unwrap_or(0)
            .min(MAX_COLUMN);

        if !positionals.is_empty() {
            sections.push(table("positional arguments:", &positionals, width));
        }
        sections.push(table("options:", &options, width));
        if !children.is_empty() {
            sections.push(table("commands:", &children, width));
        }

        if let Some(content) = self.content {
            sections.push(format!("content:\n{}", content.doc()));
        }

        let mut page = sections.join("\n\n");
        page.push('\n');
        page
    }

    fn usage(&self) -> String {
        let mut parts = vec![self.usage_path.clone(), "[-h]".to_string()];

        for argument in self.arguments.iter().filter(|a| !a.is_positional()) {
            let invocation = match &argument.kind {
                ArgKind::Flag { long, .. } => format!("{} {}", long, argument.value_name()),
                _ => argument.display_name(),
            };
            parts.push(if argument.required {
                invocation
            } else {
                format!("[{invocation}]")
            });
        }

        for argument in self.arguments.iter().filter(|a| a.is_positional()) {
            let name = argument.value_name();
            parts.push(if argument.required { name } else { format!("[{name}]") });
        }

        if !self.children.is_empty() {
            let names: Vec<&str> = self.children.iter().map(|(name, _)| *name).collect();
            parts.push(format!("{{{}}} ...", names.join(",")));
        }

        parts.join(" ")
    }
}

fn option_invocation(argument: &Argument) -> String {
    match &argument.kind {
        ArgKind::Flag { long, short } => {
            let value = argument.value_name();
            match short {
                Some(short) => format!("-{short} {value}, {long} {value}"),
                None => format!("{long} {value}"),
            }
        }
        ArgKind::Switch { long, short } => match short {
            Some(short) => format!("-{short}, {long}"),
            None => long.clone(),
        },
        ArgKind::Positional => argument.value_name(),
    }
}

fn table(title: &str, rows: &[(String, &str)], width: usize) -> String {
    let mut lines = vec![title.to_string()];

    for (invocation, help) in rows {
        if help.is_empty() {
            lines.push(format!("  {invocation}"));
        } else if invocation.len() > width {
            lines.push(format!("  {invocation}"));
            lines.push(format!("  {:width$}  {help}", ""));
        } else {
            lines.push(format!("  {invocation:width$}  {help}"));
        }
    }

    lines.join("\n")
}
