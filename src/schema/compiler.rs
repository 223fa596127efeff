//! Type descriptor to JSON Schema compilation.
//!
//! The mapping is fixed and deterministic: compiling the same descriptor twice
//! yields structurally equal nodes, and object properties keep the order the
//! fields were declared in.

use super::descriptor::{EnumDescriptor, RecordDescriptor, TypeDescriptor};
use super::node::{SchemaKind, SchemaNode};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

/// Failures raised while compiling a descriptor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("union has no alternatives")]
    EmptyUnion,

    #[error("enumeration{} has no members", format_enum_name(.name))]
    EmptyEnum { name: Option<String> },

    #[error("enumeration member {member} is not a scalar")]
    UnsupportedEnumMember { member: Value },

    #[error("record `{record}` declares field `{field}` more than once")]
    DuplicateField { record: String, field: String },
}

fn format_enum_name(name: &Option<String>) -> String {
    match name {
        Some(n) => format!(" `{}`", n),
        None => String::new(),
    }
}

/// Compile a descriptor into a schema node.
pub fn compile(descriptor: &TypeDescriptor) -> Result<SchemaNode, SchemaError> {
    match descriptor {
        TypeDescriptor::Any => Ok(SchemaNode::permissive()),
        TypeDescriptor::String => Ok(SchemaNode::of(SchemaKind::String)),
        TypeDescriptor::Integer => Ok(SchemaNode::of(SchemaKind::Integer)),
        TypeDescriptor::Float => Ok(SchemaNode::of(SchemaKind::Number)),
        TypeDescriptor::Boolean => Ok(SchemaNode::of(SchemaKind::Boolean)),
        TypeDescriptor::Bytes => Ok(SchemaNode {
            content_encoding: Some("base64".to_string()),
            ..SchemaNode::of(SchemaKind::String)
        }),
        TypeDescriptor::Date => Ok(formatted_string("date")),
        TypeDescriptor::DateTime => Ok(formatted_string("date-time")),
        TypeDescriptor::Time => Ok(formatted_string("time")),
        TypeDescriptor::None => Ok(SchemaNode::permissive()),
        TypeDescriptor::Sequence(element) => Ok(SchemaNode::array(compile_element(element)?)),
        TypeDescriptor::Set(element) => Ok(SchemaNode {
            unique_items: Some(true),
            ..SchemaNode::array(compile_element(element)?)
        }),
        TypeDescriptor::Tuple(items) => {
            let prefix = items.iter().map(compile).collect::<Result<Vec<_>, _>>()?;
            Ok(SchemaNode {
                min_items: Some(prefix.len()),
                max_items: Some(prefix.len()),
                prefix_items: Some(prefix),
                ..SchemaNode::of(SchemaKind::Array)
            })
        }
        TypeDescriptor::VarTuple(element) => Ok(SchemaNode::array(compile(element)?)),
        TypeDescriptor::Map(value) => Ok(SchemaNode {
            additional_properties: Some(Box::new(compile_element(value)?)),
            ..SchemaNode::of(SchemaKind::Object)
        }),
        TypeDescriptor::Union(alternatives) => compile_union(alternatives),
        TypeDescriptor::Enum(e) => compile_enum(e),
        TypeDescriptor::Record(r) => compile_record(r),
        TypeDescriptor::Annotated { inner, tag } => {
            let node = compile(inner)?;
            Ok(match tag.as_str() {
                Some(description) => node.with_description(description),
                None => node,
            })
        }
    }
}

fn formatted_string(format: &str) -> SchemaNode {
    SchemaNode {
        format: Some(format.to_string()),
        ..SchemaNode::of(SchemaKind::String)
    }
}

fn compile_element(element: &Option<Box<TypeDescriptor>>) -> Result<SchemaNode, SchemaError> {
    match element {
        Some(inner) => compile(inner),
        None => Ok(SchemaNode::permissive()),
    }
}

fn flatten_union<'a>(alternatives: &'a [TypeDescriptor], out: &mut Vec<&'a TypeDescriptor>) {
    for alt in alternatives {
        match alt {
            TypeDescriptor::Union(nested) => flatten_union(nested, out),
            other => out.push(other),
        }
    }
}

fn compile_union(alternatives: &[TypeDescriptor]) -> Result<SchemaNode, SchemaError> {
    let mut flat = Vec::with_capacity(alternatives.len());
    flatten_union(alternatives, &mut flat);
    if flat.is_empty() {
        return Err(SchemaError::EmptyUnion);
    }

    let present: Vec<&TypeDescriptor> = flat
        .into_iter()
        .filter(|alt| !matches!(alt, TypeDescriptor::None))
        .collect();

    match present.as_slice() {
        [] => Ok(SchemaNode::permissive()),
        [single] => compile(single),
        many => {
            let one_of = many
                .iter()
                .map(|alt| compile(alt))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(SchemaNode {
                one_of: Some(one_of),
                ..SchemaNode::default()
            })
        }
    }
}

fn compile_enum(e: &EnumDescriptor) -> Result<SchemaNode, SchemaError> {
    if e.members.is_empty() {
        return Err(SchemaError::EmptyEnum {
            name: e.name.clone(),
        });
    }
    if let Some(bad) = e
        .members
        .iter()
        .find(|m| matches!(m, Value::Null | Value::Array(_) | Value::Object(_)))
    {
        return Err(SchemaError::UnsupportedEnumMember {
            member: bad.clone(),
        });
    }

    let kind = if e.members.iter().all(Value::is_boolean) {
        SchemaKind::Boolean
    } else if e.members.iter().all(|m| m.is_i64() || m.is_u64()) {
        SchemaKind::Integer
    } else if e.members.iter().all(Value::is_number) {
        SchemaKind::Number
    } else {
        SchemaKind::String
    };

    Ok(SchemaNode {
        enum_values: Some(e.members.clone()),
        ..SchemaNode::of(kind)
    })
}

fn compile_record(record: &RecordDescriptor) -> Result<SchemaNode, SchemaError> {
    let mut seen = HashSet::with_capacity(record.fields.len());
    let mut properties = Vec::with_capacity(record.fields.len());
    let mut required = Vec::new();

    for field in &record.fields {
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateField {
                record: record.name.clone(),
                field: field.name.clone(),
            });
        }
        properties.push((field.name.clone(), compile(&field.descriptor)?));
        if field.default.is_none() {
            required.push(field.name.clone());
        }
    }

    Ok(SchemaNode::object(properties, required))
}
