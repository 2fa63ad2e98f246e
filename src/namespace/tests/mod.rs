//! Unit tests for namespace module
//!
//! Tests reference resolution over mappings and modules, and expansion of
//! nested values. No filesystem dependencies.

#![allow(clippy::panic)]

use serde_json::json;

use crate::{
    cli::CliError,
    namespace::{Module, Namespace, Variable, expand, expand_tokens, resolve_reference},
};

fn sample() -> Namespace {
    let mut ns = Namespace::new();
    ns.insert("name", "widget");
    ns.insert("nothing", json!(null));
    ns.insert(
        "config",
        json!({"db": {"host": "localhost", "port": 5432}, "tags": ["a", "b"]}),
    );
    ns.insert_module(
        Module::new("settings")
            .with_attribute("region", json!("eu"))
            .with_attribute("limits", json!({"cpu": 2}))
            .with_attribute("nested", Module::new("nested").with_attribute("flag", json!(true))),
    );
    ns
}

#[test]
fn resolves_top_level_names() {
    let ns = sample();
    assert_eq!(resolve_reference(&ns, "name"), Some(json!("widget")));
}

#[test]
fn resolves_mapping_keys_segment_by_segment() {
    let ns = sample();
    assert_eq!(resolve_reference(&ns, "config.db.port"), Some(json!(5432)));
    assert_eq!(
        resolve_reference(&ns, "config.db"),
        Some(json!({"host": "localhost", "port": 5432}))
    );
}

#[test]
fn resolves_module_attributes() {
    let ns = sample();
    assert_eq!(resolve_reference(&ns, "settings.region"), Some(json!("eu")));
    assert_eq!(resolve_reference(&ns, "settings.limits.cpu"), Some(json!(2)));
    assert_eq!(
        resolve_reference(&ns, "settings.nested.flag"),
        Some(json!(true))
    );
}

#[test]
fn whole_module_resolves_to_its_attributes() {
    let ns = sample();
    assert_eq!(
        resolve_reference(&ns, "settings.nested"),
        Some(json!({"flag": true}))
    );
}

#[test]
fn null_is_a_valid_value() {
    let ns = sample();
    assert_eq!(resolve_reference(&ns, "nothing"), Some(json!(null)));
}

#[test]
fn unresolvable_paths() {
    let ns = sample();
    assert_eq!(resolve_reference(&ns, "missing"), None);
    assert_eq!(resolve_reference(&ns, "config.db.user"), None);
    assert_eq!(resolve_reference(&ns, "name.length"), None);
    assert_eq!(resolve_reference(&ns, "settings.unknown"), None);
    assert_eq!(resolve_reference(&ns, ""), None);
}

#[test]
fn sequences_are_not_indexed() {
    let ns = sample();
    assert_eq!(resolve_reference(&ns, "config.tags.0"), None);
}

#[test]
fn expand_without_references_is_identity() {
    let ns = sample();
    let value = json!({"a": [1, "two", {"b": null}], "c": "no $ prefix", "d": 1.5});

    assert_eq!(expand(&ns, value.clone()).unwrap(), value);
}

#[test]
fn expand_replaces_nested_references() {
    let ns = sample();
    let value = json!({
        "host": "$config.db.host",
        "list": ["$name", "plain", ["$settings.region"]],
        "$name": "keys are left alone"
    });

    assert_eq!(
        expand(&ns, value).unwrap(),
        json!({
            "host": "localhost",
            "list": ["widget", "plain", ["eu"]],
            "$name": "keys are left alone"
        })
    );
}

#[test]
fn expanded_values_are_not_expanded_again() {
    let mut ns = Namespace::new();
    ns.insert("alias", "$target");
    ns.insert("target", "value");

    assert_eq!(expand(&ns, json!("$alias")).unwrap(), json!("$target"));
}

#[test]
fn expand_reports_unresolved_path() {
    let ns = sample();
    let error = expand(&ns, json!({"x": ["$config.db.user"]})).unwrap_err();

    assert_eq!(error, CliError::VariableNotFound(String::from("config.db.user")));
    assert_eq!(
        error.to_string(),
        "Unable to find a valid value for \"config.db.user\"."
    );
}

#[test]
fn expand_does_not_mutate_namespace() {
    let ns = sample();
    let before = ns.clone();

    let _ = expand(&ns, json!(["$name", "$missing"]));
    assert_eq!(ns, before);
}

#[test]
fn expand_tokens_keeps_resolved_types() {
    let ns = sample();
    let tokens = vec![
        String::from("--port"),
        String::from("$config.db.port"),
        String::from("$settings.limits"),
    ];

    assert_eq!(
        expand_tokens(&ns, tokens).unwrap(),
        vec![json!("--port"), json!(5432), json!({"cpu": 2})]
    );
}

#[test]
fn namespace_bindings() {
    let mut ns = sample();

    assert!(ns.contains("settings"));
    assert!(ns.value("settings").is_none());
    assert!(matches!(ns.get("settings"), Some(Variable::Module(_))));

    if let Some(name) = ns.value_mut("name") {
        *name = json!("gadget");
    }
    assert_eq!(ns.value("name"), Some(&json!("gadget")));

    let removed = ns.remove("name");
    assert_eq!(removed, Some(Variable::Value(json!("gadget"))));
    assert!(!ns.contains("name"));
    assert_eq!(ns.len(), 3);
}

#[test]
fn namespace_from_value_requires_mapping() {
    let ns = Namespace::from_value(json!({"a": 1, "b": {"c": 2}})).unwrap();
    assert_eq!(resolve_reference(&ns, "b.c"), Some(json!(2)));

    assert!(Namespace::from_value(json!([1, 2])).is_none());
}

#[test]
fn namespace_snapshot_includes_modules() {
    let ns = sample();
    let snapshot = ns.to_value();

    assert_eq!(snapshot["name"], json!("widget"));
    assert_eq!(snapshot["settings"]["nested"], json!({"flag": true}));
}
