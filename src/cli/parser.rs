//! Tokenizing and parsing of argument lines against the command tree.
//!
//! Parsing walks the tree one level at a time. Each group level consumes its
//! own options until the first positional token, which names the next child;
//! the command level consumes the rest. Missing required arguments and
//! unrecognized tokens are only reported once every level has been parsed,
//! so `-h` anywhere on the line always wins.

use std::{
    collections::{HashSet, VecDeque},
    sync::LazyLock,
};

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::namespace::{Namespace, expand_tokens};

use super::{
    CliError,
    formatting::format_value,
    help::HelpPage,
    registry::{Command, CommandGroup, Entry},
    types::{ArgKind, Argument, Arguments},
};

/// Result of parsing a line that did not fail.
pub(crate) enum ParseOutcome<'a> {
    /// A command was resolved and its arguments parsed.
    Command(Invocation<'a>),
    /// Help was requested; carries the rendered page.
    Help(String),
}

/// A resolved command with its parsed arguments.
pub(crate) struct Invocation<'a> {
    pub(crate) command: &'a Command,
    pub(crate) path: Vec<&'a str>,
    pub(crate) arguments: Arguments,
}

/// Splits a line with shell quoting rules and expands `$` references.
pub(crate) fn tokenize(line: &str, namespace: &Namespace) -> Result<Vec<Value>, CliError> {
    let words = shell_words::split(line)
        .map_err(|e| CliError::Grammar(format!("unable to split arguments: {e}")))?;
    debug!(?words, "Tokenized argument line");

    expand_tokens(namespace, words)
}

/// Parses expanded tokens against the tree rooted at `root`.
pub(crate) fn parse<'a>(
    root: &'a CommandGroup,
    tokens: Vec<Value>,
    magic_prefix: &str,
) -> Result<ParseOutcome<'a>, CliError> {
    let mut parser = Parser {
        tokens: tokens.into(),
        arguments: Arguments::default(),
        unrecognized: Vec::new(),
        options_done: false,
    };

    let mut path: Vec<&'a str> = Vec::new();
    let mut levels: Vec<Level<'a>> = Vec::new();
    let mut group = root;

    loop {
        let (level, end) = parser.parse_level(group.arguments(), true)?;
        levels.push(level);

        let name = match end {
            LevelEnd::Help => {
                let page = HelpPage {
                    usage_path: usage_path(magic_prefix, root, &path),
                    description: group.help(),
                    arguments: group.arguments(),
                    children: group.children(),
                    content: None,
                };
                return Ok(ParseOutcome::Help(page.render()));
            }
            LevelEnd::Exhausted => {
                return Err(CliError::Grammar(format!(
                    "the following arguments are required: command (choose from {})",
                    choices(group)
                )));
            }
            LevelEnd::Subcommand(name) => name,
        };

        let entry = name.as_str().and_then(|name| group.find(name));
        match entry {
            Some(Entry::Group(child)) => {
                path.push(child.name());
                group = child;
            }
            Some(Entry::Command(command)) => {
                path.push(command.name());

                let (level, end) = parser.parse_level(command.arguments(), false)?;
                levels.push(level);

                if matches!(end, LevelEnd::Help) {
                    let page = HelpPage {
                        usage_path: usage_path(magic_prefix, root, &path),
                        description: command.help(),
                        arguments: command.arguments(),
                        children: Vec::new(),
                        content: command.content(),
                    };
                    return Ok(ParseOutcome::Help(page.render()));
                }

                let arguments = parser.finish(levels)?;
                debug!(path = %path.join(" "), %arguments, "Parsed arguments");

                return Ok(ParseOutcome::Command(Invocation {
                    command,
                    path,
                    arguments,
                }));
            }
            None => {
                return Err(CliError::Grammar(format!(
                    "argument command: invalid choice: {} (choose from {})",
                    format_value(&name),
                    choices(group)
                )));
            }
        }
    }
}

struct Parser {
    tokens: VecDeque<Value>,
    arguments: Arguments,
    unrecognized: Vec<Value>,
    options_done: bool,
}

/// Arguments declared at one level of the path, and which of them were given.
struct Level<'a> {
    specs: &'a [Argument],
    seen: HashSet<&'a str>,
}

enum LevelEnd {
    Help,
    Subcommand(Value),
    Exhausted,
}

impl Parser {
    fn parse_level<'a>(
        &mut self,
        specs: &'a [Argument],
        expects_subcommand: bool,
    ) -> Result<(Level<'a>, LevelEnd), CliError> {
        let mut level = Level {
            specs,
            seen: HashSet::new(),
        };
        let mut positionals = specs.iter().filter(|spec| spec.is_positional());

        while let Some(token) = self.tokens.pop_front() {
            let option = token
                .as_str()
                .filter(|text| !self.options_done && looks_like_option(text))
                .map(str::to_string);

            if let Some(option) = option {
                if option == "--" {
                    self.options_done = true;
                    continue;
                }
                if option == "-h" || option == "--help" {
                    return Ok((level, LevelEnd::Help));
                }

                let (name, inline) = split_option(&option);
                match specs.iter().find(|spec| spec.matches_option(name)) {
                    Some(spec) => {
                        let value = self.option_value(spec, inline)?;
                        self.arguments.insert(&spec.name, spec.accept(value)?);
                        level.seen.insert(&spec.name);
                    }
                    None => self.unrecognized.push(token),
                }
                continue;
            }

            if let Some(spec) = positionals.next() {
                self.arguments.insert(&spec.name, spec.accept(token)?);
                level.seen.insert(&spec.name);
            } else if expects_subcommand {
                return Ok((level, LevelEnd::Subcommand(token)));
            } else {
                self.unrecognized.push(token);
            }
        }

        Ok((level, LevelEnd::Exhausted))
    }

    fn option_value(&mut self, spec: &Argument, inline: Option<&str>) -> Result<Value, CliError> {
        match spec.kind {
            ArgKind::Switch { .. } => match inline {
                Some(inline) => Err(CliError::Grammar(format!(
                    "argument {}: ignored explicit argument '{}'",
                    spec.display_name(),
                    inline
                ))),
                None => Ok(Value::Bool(true)),
            },
            _ => {
                if let Some(inline) = inline {
                    return Ok(Value::String(inline.to_string()));
                }

                let next_is_value = self.tokens.front().is_some_and(|next| {
                    next.as_str()
                        .is_none_or(|text| self.options_done || !looks_like_option(text))
                });

                match self.tokens.pop_front() {
                    Some(value) if next_is_value => Ok(value),
                    other => {
                        if let Some(token) = other {
                            self.tokens.push_front(token);
                        }
                        Err(CliError::Grammar(format!(
                            "argument {}: expected one argument",
                            spec.display_name()
                        )))
                    }
                }
            }
        }
    }

    /// Applies defaults and reports missing or unrecognized arguments,
    /// innermost level first.
    fn finish(mut self, levels: Vec<Level<'_>>) -> Result<Arguments, CliError> {
        for level in levels.iter().rev() {
            let missing: Vec<String> = level
                .specs
                .iter()
                .filter(|spec| spec.required && !level.seen.contains(spec.name.as_str()))
                .map(Argument::display_name)
                .collect();

            if !missing.is_empty() {
                return Err(CliError::Grammar(format!(
                    "the following arguments are required: {}",
                    missing.join(", ")
                )));
            }
        }

        if !self.unrecognized.is_empty() {
            let tokens: Vec<String> = self
                .unrecognized
                .iter()
                .map(|token| match token {
                    Value::String(text) => text.clone(),
                    other => format_value(other),
                })
                .collect();
            return Err(CliError::Grammar(format!(
                "unrecognized arguments: {}",
                tokens.join(" ")
            )));
        }

        for level in &levels {
            for spec in level.specs {
                if !self.arguments.contains(&spec.name) {
                    let default = spec.default.clone().unwrap_or(Value::Null);
                    self.arguments.insert(&spec.name, default);
                }
            }
        }

        Ok(self.arguments)
    }
}

static NEGATIVE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-\d+$|^-\d*\.\d+$").expect("static regex must compile"));

/// Whether a textual token is an option rather than a value. Plain negative
/// numbers and a lone `-` are values; `-inf` and `-nan` are not numbers.
fn looks_like_option(text: &str) -> bool {
    text.len() > 1 && text.starts_with('-') && !NEGATIVE_NUMBER.is_match(text)
}

/// Splits `--name=value` and `-nvalue` into the option and its inline value.
fn split_option(option: &str) -> (&str, Option<&str>) {
    if option.starts_with("--") {
        return match option.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (option, None),
        };
    }

    let split = option
        .char_indices()
        .nth(2)
        .map(|(index, _)| index)
        .unwrap_or(option.len());
    let (name, rest) = option.split_at(split);
    let rest = rest.strip_prefix('=').unwrap_or(rest);

    (name, Some(rest).filter(|rest| !rest.is_empty()))
}

fn usage_path(magic_prefix: &str, root: &CommandGroup, path: &[&str]) -> String {
    let mut usage = format!("{magic_prefix}{}", root.name());
    for segment in path {
        usage.push(' ');
        usage.push_str(segment);
    }
    usage
}

fn choices(group: &CommandGroup) -> String {
    let names: Vec<String> = group
        .children()
        .iter()
        .map(|(name, _)| format!("'{name}'"))
        .collect();
    names.join(", ")
}
