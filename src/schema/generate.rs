//! Schema generation from `schemars`-annotated types.
//!
//! Used for tools whose arguments are described by a Rust struct rather than a
//! [`TypeDescriptor`](super::TypeDescriptor); the resulting JSON is handed to the
//! registry as a raw schema.

use serde_json::{json, Value};

/// Full JSON schema of `T` as produced by `schemars`.
pub fn json_schema_from_type<T: schemars::JsonSchema>() -> Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(&schema).unwrap_or_else(|_| json!({}))
}

/// JSON schema of `T` shaped for a tool's `parameters` slot.
///
/// The meta keys `$schema` and `title` are dropped; everything else
/// (including `definitions` for nested types) is kept.
pub fn parameters_from_type<T: schemars::JsonSchema>() -> Value {
    let mut schema = json_schema_from_type::<T>();
    if let Value::Object(map) = &mut schema {
        map.remove("$schema");
        map.remove("title");
        if !map.contains_key("type") {
            map.insert("type".into(), json!("object"));
        }
    }
    schema
}
