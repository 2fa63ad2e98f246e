//! Unit tests for CLI module
//!
//! Tests reassembly, parsing, help rendering and dispatch against small
//! in-memory command trees. Output is captured with `RecordingOutput`.

#![allow(clippy::panic)]


use std::{cell::RefCell, rc::Rc};

use serde_json::{Value, json};

use crate::{
    cli::{ArgType, Argument, Arguments, CommandLineInterface, RecordingOutput},
    content::{ContentBinding, SchemaSource},
};

/// Arguments and content each handler was called with, in call order.
#[derive(Default)]
struct Calls(RefCell<Vec<(String, Value, Option<Value>)>>);

impl Calls {
    fn record(&self, command: &str, args: &Arguments, content: Option<Value>) {
        self.0
            .borrow_mut()
            .push((command.to_string(), args.clone().into_value(), content));
    }

    fn all(&self) -> Vec<(String, Value, Option<Value>)> {
        self.0.borrow().clone()
    }

    fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

/// Test interface shaped like the bundled modules:
///
/// * `hello`: no content
/// * `foo --environment env {create,delete}`
/// * `note`: plain-text content
/// * `tune --level int --ratio float --verbose -c choice [target]`
struct Fixture {
    cli: CommandLineInterface,
    output: Rc<RecordingOutput>,
    calls: Rc<Calls>,
}

fn fixture() -> Fixture {
    let output = Rc::new(RecordingOutput::default());
    let calls = Rc::new(Calls::default());
    let mut cli = CommandLineInterface::new("nbcli", Some("Test interface"))
        .with_output(Rc::clone(&output));

    let seen = Rc::clone(&calls);
    cli.add_command(
        "hello",
        move |args, _| {
            seen.record("hello", args, None);
            Ok(())
        },
        Some("Simple top-level command"),
    )
    .unwrap();

    let foo = cli.add_command_group("foo", Some("Manage foo resources")).unwrap();
    foo.add_argument(
        Argument::flag("environment")
            .metavar("env")
            .value_type(ArgType::String)
            .help("The name of the environment")
            .default_value("default"),
    );

    let seen = Rc::clone(&calls);
    foo.add_content_command(
        "create",
        move |args, content, _| {
            seen.record("foo create", args, Some(content));
            Ok(())
        },
        ContentBinding::structured(
            "name: name-of-the-resource",
            SchemaSource::Examples(vec![json!({"name": ""}), json!({"name": "", "xyz": 123})]),
        ),
        Some("Creates a foo resource"),
    )
    .unwrap();

    let seen = Rc::clone(&calls);
    foo.add_command(
        "delete",
        move |args, _| {
            seen.record("foo delete", args, None);
            Ok(())
        },
        Some("Deletes a foo resource"),
    )
    .unwrap()
    .add_argument(
        Argument::flag("name")
            .metavar("name")
            .required(true)
            .value_type(ArgType::String)
            .help("The name of the resource"),
    );

    let seen = Rc::clone(&calls);
    cli.add_content_command(
        "note",
        move |args, content, _| {
            seen.record("note", args, Some(content));
            Ok(())
        },
        ContentBinding::text("Any text."),
        None,
    )
    .unwrap();

    let seen = Rc::clone(&calls);
    cli.add_command(
        "tune",
        move |args, _| {
            seen.record("tune", args, None);
            Ok(())
        },
        Some("Adjusts settings"),
    )
    .unwrap()
    .add_argument(Argument::flag("level").value_type(ArgType::Integer))
    .add_argument(Argument::flag("ratio").value_type(ArgType::Number))
    .add_argument(Argument::switch("verbose").short('v'))
    .add_argument(Argument::flag("color").short('c').choices(["red", "blue"]))
    .add_argument(Argument::positional("target").required(false));

    Fixture { cli, output, calls }
}
