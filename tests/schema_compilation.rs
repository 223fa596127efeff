//! Tests for the type-schema compiler over Rust-described types

use ai_lib_tools::schema::{
    compile, Describe, EnumDescriptor, RecordDescriptor, SchemaError, TypeDescriptor,
};
use serde_json::json;
use std::collections::{BTreeSet, HashMap};

enum Unit {
    #[allow(dead_code)]
    Celsius,
    #[allow(dead_code)]
    Fahrenheit,
}

impl Describe for Unit {
    fn descriptor() -> TypeDescriptor {
        EnumDescriptor::named("Unit", ["celsius", "fahrenheit"]).into()
    }
}

struct Location;

impl Describe for Location {
    fn descriptor() -> TypeDescriptor {
        RecordDescriptor::new("Location")
            .field("city", String::descriptor())
            .field_with_default("country", Option::<String>::descriptor(), None::<String>)
            .into()
    }
}

#[test]
fn test_described_std_types() {
    let cases = vec![
        (Vec::<String>::descriptor(), json!({"type": "array", "items": {"type": "string"}})),
        (
            BTreeSet::<i32>::descriptor(),
            json!({"type": "array", "items": {"type": "integer"}, "uniqueItems": true}),
        ),
        (
            HashMap::<String, f64>::descriptor(),
            json!({"type": "object", "additionalProperties": {"type": "number"}}),
        ),
        (Option::<bool>::descriptor(), json!({"type": "boolean"})),
        (
            <(String, i64, bool)>::descriptor(),
            json!({
                "type": "array",
                "prefixItems": [{"type": "string"}, {"type": "integer"}, {"type": "boolean"}],
                "minItems": 3,
                "maxItems": 3
            }),
        ),
        (
            bytes::Bytes::descriptor(),
            json!({"type": "string", "contentEncoding": "base64"}),
        ),
        (
            std::time::SystemTime::descriptor(),
            json!({"type": "string", "format": "date-time"}),
        ),
    ];

    for (descriptor, expected) in cases {
        assert_eq!(
            compile(&descriptor).unwrap().to_value(),
            expected,
            "descriptor {:?}",
            descriptor
        );
    }
}

#[test]
fn test_domain_types() {
    assert_eq!(
        compile(&Unit::descriptor()).unwrap().to_value(),
        json!({"type": "string", "enum": ["celsius", "fahrenheit"]})
    );
    assert_eq!(
        compile(&Location::descriptor()).unwrap().to_value(),
        json!({
            "type": "object",
            "properties": {"city": {"type": "string"}, "country": {"type": "string"}},
            "required": ["city"]
        })
    );
    assert_eq!(
        compile(&Vec::<Location>::descriptor()).unwrap().to_value()["items"]["required"],
        json!(["city"])
    );
}

#[test]
fn test_union_of_records_and_scalars() {
    let d = TypeDescriptor::union([Location::descriptor(), TypeDescriptor::String, TypeDescriptor::None]);
    let node = compile(&d).unwrap().to_value();
    assert_eq!(node["oneOf"].as_array().unwrap().len(), 2);
    assert_eq!(node["oneOf"][0]["type"], "object");
    assert_eq!(node["oneOf"][1], json!({"type": "string"}));
}

#[test]
fn test_nested_failures_propagate() {
    let d = TypeDescriptor::sequence_of(TypeDescriptor::map_of(TypeDescriptor::Enum(
        EnumDescriptor::literal(Vec::<serde_json::Value>::new()),
    )));
    assert_eq!(compile(&d), Err(SchemaError::EmptyEnum { name: None }));
}

#[test]
fn test_determinism() {
    let descriptors = vec![
        Location::descriptor(),
        Unit::descriptor(),
        HashMap::<String, Vec<(i32, String)>>::descriptor(),
        TypeDescriptor::String.described("free text"),
    ];
    for d in descriptors {
        let first = serde_json::to_string(&compile(&d).unwrap()).unwrap();
        let second = serde_json::to_string(&compile(&d.clone()).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
