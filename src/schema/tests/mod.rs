//! Unit tests for schema module
//!
//! Tests structural inference from examples and validation messages.

#![allow(clippy::panic)]

use serde_json::{Value, json};

use crate::schema::{SchemaViolation, infer_schema, validate};

fn violation(instance: Value, schema: &Value) -> SchemaViolation {
    match validate(&instance, schema) {
        Err(violation) => violation,
        Ok(()) => panic!("{instance} unexpectedly satisfied {schema}"),
    }
}

#[test]
fn infer_object_with_optional_key() {
    let schema = infer_schema(&[json!({"name": "x"}), json!({"name": "y", "xyz": 1})]);

    assert_eq!(
        schema,
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "xyz": {"type": "integer"}
            },
            "required": ["name"]
        })
    );
}

#[test]
fn inferred_schema_accepts_generalization() {
    let schema = infer_schema(&[json!({"name": "x"}), json!({"name": "y", "xyz": 1})]);

    assert!(validate(&json!({"name": "a", "xyz": 2}), &schema).is_ok());
    assert!(validate(&json!({"name": "a"}), &schema).is_ok());
    assert!(validate(&json!({"name": "a", "other": [1]}), &schema).is_ok());
    assert!(validate(&json!({"xyz": "not-a-number"}), &schema).is_err());
}

#[test]
fn inferred_schema_accepts_every_example() {
    let examples = [
        json!({"id": 1, "tags": ["a"], "meta": {"owner": "x"}}),
        json!({"id": 2.5, "tags": [], "meta": {"owner": "y", "ttl": 3}}),
        json!({"id": 3, "tags": ["b", "c"], "meta": null}),
    ];
    let schema = infer_schema(&examples);

    for example in &examples {
        assert!(validate(example, &schema).is_ok(), "rejected {example}");
    }
}

#[test]
fn integer_and_number_widen_to_number() {
    let schema = infer_schema(&[json!(1), json!(2.5)]);
    assert_eq!(schema["type"], json!("number"));
}

#[test]
fn unrelated_scalars_become_type_list() {
    let schema = infer_schema(&[json!("a"), json!(1), json!(null)]);
    assert_eq!(schema["type"], json!(["string", "integer", "null"]));
}

#[test]
fn containers_mixed_with_scalars_become_any_of() {
    let schema = infer_schema(&[json!("a"), json!({"k": 1})]);

    assert_eq!(
        schema["anyOf"],
        json!([
            {"type": "string"},
            {"type": "object", "properties": {"k": {"type": "integer"}}, "required": ["k"]}
        ])
    );
}

#[test]
fn array_items_are_merged() {
    let schema = infer_schema(&[json!([1, 2]), json!([3.5])]);
    assert_eq!(schema["items"], json!({"type": "number"}));

    let empty = infer_schema(&[json!([])]);
    assert!(empty.get("items").is_none());
}

#[test]
fn no_examples_accepts_anything() {
    let schema = infer_schema(&[]);

    assert!(validate(&json!({"anything": [1, "two"]}), &schema).is_ok());
    assert!(validate(&json!("text"), &schema).is_ok());
}

#[test]
fn type_mismatch_reports_location() {
    let schema = json!({
        "type": "object",
        "properties": {"db": {"type": "object", "properties": {"port": {"type": "integer"}}}}
    });

    let found = violation(json!({"db": {"port": "high"}}), &schema);
    assert_eq!(found.path, "db.port");
    assert!(found.message.contains("\"high\""));
    assert!(found.message.contains("integer"));
    assert!(found.to_string().ends_with(" at 'db.port'"));
}

#[test]
fn integer_rejects_fractions() {
    let schema = json!({"type": "integer"});
    assert!(validate(&json!(4), &schema).is_ok());
    assert!(validate(&json!(4.5), &schema).is_err());
}

#[test]
fn required_property_at_root() {
    let found = violation(json!({}), &json!({"required": ["name"]}));

    assert_eq!(found.path, "");
    assert!(found.message.contains("name"));
    assert!(found.message.contains("required"));
}

#[test]
fn additional_properties_false() {
    let schema = json!({"properties": {"a": {}}, "additionalProperties": false});
    let found = violation(json!({"a": 1, "b": 2}), &schema);

    assert!(found.message.contains("Additional properties are not allowed"));
    assert!(found.message.contains("'b'"));
}

#[test]
fn additional_properties_schema() {
    let schema = json!({"additionalProperties": {"type": "string"}});
    assert!(validate(&json!({"x": "ok"}), &schema).is_ok());
    assert_eq!(violation(json!({"x": 1}), &schema).path, "x");
}

#[test]
fn enum_and_const() {
    assert!(validate(&json!("red"), &json!({"enum": ["red", "blue"]})).is_ok());
    assert!(validate(&json!("green"), &json!({"enum": ["red", "blue"]})).is_err());
    assert!(validate(&json!(2), &json!({"const": 1})).is_err());
}

#[test]
fn array_keywords() {
    let schema = json!({"type": "array", "items": {"type": "string"}, "minItems": 1, "maxItems": 2});

    assert!(validate(&json!(["a"]), &schema).is_ok());
    assert!(validate(&json!([]), &schema).is_err());
    assert!(validate(&json!(["a", "b", "c"]), &schema).is_err());
    assert_eq!(violation(json!(["a", 1]), &schema).path, "1");
}

#[test]
fn string_keywords() {
    let schema = json!({"minLength": 2, "maxLength": 4, "pattern": "^[a-z]+$"});

    assert!(validate(&json!("abc"), &schema).is_ok());
    assert!(validate(&json!("a"), &schema).is_err());
    assert!(validate(&json!("abcde"), &schema).is_err());
    assert!(validate(&json!("AB"), &schema).is_err());
}

#[test]
fn number_bounds() {
    let schema = json!({"minimum": 1, "maximum": 10});

    assert!(validate(&json!(5), &schema).is_ok());
    assert!(validate(&json!(0), &schema).is_err());
    assert!(validate(&json!(11), &schema).is_err());
}

#[test]
fn exclusive_bounds() {
    let schema = json!({"type": "integer", "exclusiveMinimum": 0, "exclusiveMaximum": 10});

    assert!(validate(&json!(5), &schema).is_ok());
    assert!(validate(&json!(20), &schema).is_err());
    assert!(validate(&json!(10), &schema).is_err());
    assert!(validate(&json!(0), &schema).is_err());
}

#[test]
fn not_keyword() {
    let schema = json!({"not": {"type": "string"}});

    assert!(validate(&json!(1), &schema).is_ok());
    assert!(validate(&json!("a"), &schema).is_err());
}

#[test]
fn multiple_of() {
    let schema = json!({"multipleOf": 5});

    assert!(validate(&json!(10), &schema).is_ok());
    assert!(validate(&json!(7), &schema).is_err());
}

#[test]
fn unique_items() {
    let schema = json!({"uniqueItems": true});

    assert!(validate(&json!([1, 2]), &schema).is_ok());
    assert!(validate(&json!([1, 1]), &schema).is_err());
}

#[test]
fn property_counts() {
    assert!(validate(&json!({}), &json!({"minProperties": 1})).is_err());
    assert!(validate(&json!({"a": 1, "b": 2}), &json!({"maxProperties": 1})).is_err());
    assert!(validate(&json!({"a": 1}), &json!({"minProperties": 1, "maxProperties": 1})).is_ok());
}

#[test]
fn pattern_properties() {
    let schema = json!({"patternProperties": {"^x": {"type": "integer"}}});

    assert!(validate(&json!({"xa": 1, "other": "s"}), &schema).is_ok());
    assert_eq!(violation(json!({"xa": "s"}), &schema).path, "xa");
}

#[test]
fn property_names() {
    let schema = json!({"propertyNames": {"maxLength": 3}});

    assert!(validate(&json!({"abc": 1}), &schema).is_ok());
    assert!(validate(&json!({"abcd": 1}), &schema).is_err());
}

#[test]
fn dependent_required() {
    let schema = json!({"dependentRequired": {"port": ["host"]}});

    assert!(validate(&json!({"host": "h", "port": 1}), &schema).is_ok());
    assert!(validate(&json!({"port": 1}), &schema).is_err());
}

#[test]
fn conditional_schemas() {
    let schema = json!({
        "if": {"properties": {"kind": {"const": "tcp"}}, "required": ["kind"]},
        "then": {"required": ["port"]},
        "else": {"required": ["path"]}
    });

    assert!(validate(&json!({"kind": "tcp", "port": 1}), &schema).is_ok());
    assert!(validate(&json!({"kind": "tcp"}), &schema).is_err());
    assert!(validate(&json!({"kind": "unix", "path": "/s"}), &schema).is_ok());
    assert!(validate(&json!({"kind": "unix"}), &schema).is_err());
}

#[test]
fn prefix_items() {
    let schema = json!({"prefixItems": [{"type": "string"}, {"type": "integer"}]});

    assert!(validate(&json!(["a", 1, true]), &schema).is_ok());
    assert_eq!(violation(json!(["a", "b"]), &schema).path, "1");
}

#[test]
fn combinators() {
    let any_of = json!({"anyOf": [{"type": "string"}, {"type": "integer"}]});
    assert!(validate(&json!(1), &any_of).is_ok());
    assert!(validate(&json!(true), &any_of).is_err());

    let one_of = json!({"oneOf": [{"type": "number"}, {"type": "integer"}]});
    assert!(validate(&json!(1.5), &one_of).is_ok());
    assert!(validate(&json!(1), &one_of).is_err());

    let all_of = json!({"allOf": [{"type": "integer"}, {"minimum": 3}]});
    assert!(validate(&json!(2), &all_of).is_err());
}

#[test]
fn local_references() {
    let schema = json!({
        "type": "object",
        "properties": {"item": {"$ref": "#/$defs/Item"}},
        "$defs": {"Item": {"type": "object", "required": ["id"]}}
    });

    assert!(validate(&json!({"item": {"id": 1}}), &schema).is_ok());
    assert_eq!(violation(json!({"item": {}}), &schema).path, "item");
}

#[test]
fn recursive_references_that_descend_are_allowed() {
    let schema = json!({
        "type": "object",
        "properties": {"child": {"$ref": "#"}, "value": {"type": "integer"}}
    });

    assert!(validate(&json!({"child": {"child": {"value": 1}}}), &schema).is_ok());
    assert_eq!(
        violation(json!({"child": {"value": "x"}}), &schema).path,
        "child.value"
    );
}

#[test]
fn self_reference_is_reported() {
    let found = violation(json!(1), &json!({"$ref": "#"}));

    assert_eq!(found.path, "");
    assert_eq!(found.message, "schema reference cycle at '#'");
}

#[test]
fn reference_cycle_through_definitions_is_reported() {
    let schema = json!({
        "properties": {"a": {"$ref": "#/$defs/loop"}},
        "$defs": {"loop": {"allOf": [{"$ref": "#/$defs/loop"}]}}
    });

    let found = violation(json!({"a": 1}), &schema);
    assert!(found.message.starts_with("schema reference cycle at '#/$defs/loop"));
}

#[test]
fn invalid_schema_is_reported() {
    let found = violation(json!(1), &json!({"type": 12}));
    assert!(found.message.starts_with("invalid schema: "));
}

#[test]
fn boolean_schemas() {
    assert!(validate(&json!(1), &json!(true)).is_ok());
    assert!(validate(&json!(1), &json!(false)).is_err());
}
