#![allow(clippy::panic)]

use std::rc::Rc;

use serde_json::json;

use crate::{
    cli::{CliError, CommandLineInterface, Outcome, RecordingOutput},
    namespace::Namespace,
    sample::MODULES,
};

fn sample_cli() -> (CommandLineInterface, Rc<RecordingOutput>) {
    let output = Rc::new(RecordingOutput::default());
    let cli = CommandLineInterface::from_modules("nbcli", MODULES, None)
        .unwrap()
        .with_output(Rc::clone(&output));
    (cli, output)
}

#[test]
fn modules_register_every_command() {
    let (cli, _) = sample_cli();

    assert_eq!(
        cli.root().list_commands(),
        vec!["foo create", "foo delete", "hello"]
    );
}

#[test]
fn hello_dispatches() {
    let (cli, output) = sample_cli();
    let mut ns = Namespace::new();

    assert_eq!(cli.execute("hello", "", &mut ns).unwrap(), Outcome::Dispatched);
    assert!(ns.is_empty());
    assert!(output.errors().is_empty());
}

#[test]
fn foo_create_stores_resource_with_default_xyz() {
    let (cli, _) = sample_cli();
    let mut ns = Namespace::new();

    let outcome = cli.execute("foo create", "name: widget", &mut ns).unwrap();

    assert_eq!(outcome, Outcome::Dispatched);
    assert_eq!(ns.value("widget"), Some(&json!({"type": "foo", "xyz": 123})));
}

#[test]
fn foo_create_expands_references() {
    let (cli, _) = sample_cli();
    let mut ns = Namespace::new();
    ns.insert("defaults", json!({"name": "gadget", "xyz": 7}));

    let outcome = cli
        .execute("foo create", "name: $defaults.name\nxyz: $defaults.xyz", &mut ns)
        .unwrap();

    assert_eq!(outcome, Outcome::Dispatched);
    assert_eq!(ns.value("gadget"), Some(&json!({"type": "foo", "xyz": 7})));
}

#[test]
fn foo_create_rejects_content_outside_examples() {
    let (cli, output) = sample_cli();
    let mut ns = Namespace::new();

    let outcome = cli.execute("foo create", "xyz: 5", &mut ns).unwrap();

    assert!(matches!(
        outcome,
        Outcome::ContentFailed(CliError::SchemaViolation(_))
    ));
    assert!(ns.is_empty());
    assert_eq!(output.errors().len(), 1);
}

#[test]
fn foo_delete_removes_resource() {
    let (cli, _) = sample_cli();
    let mut ns = Namespace::new();
    ns.insert("widget", json!({"type": "foo", "xyz": 123}));

    let outcome = cli.execute("foo delete --name widget", "", &mut ns).unwrap();

    assert_eq!(outcome, Outcome::Dispatched);
    assert!(!ns.contains("widget"));
}

#[test]
fn foo_delete_of_unknown_name_is_a_handler_fault() {
    let (cli, output) = sample_cli();
    let mut ns = Namespace::new();

    let error = cli
        .execute("foo delete --name ghost", "", &mut ns)
        .unwrap_err();

    assert_eq!(error.to_string(), "no variable named \"ghost\"");
    assert!(output.errors().is_empty());
}

#[test]
fn foo_delete_requires_name() {
    let (cli, output) = sample_cli();
    let mut ns = Namespace::new();

    let outcome = cli.execute("foo delete", "", &mut ns).unwrap();

    assert!(matches!(outcome, Outcome::ParseFailed(CliError::Grammar(_))));
    assert_eq!(
        output.errors(),
        vec![String::from(
            "the following arguments are required: --name"
        )]
    );
}
