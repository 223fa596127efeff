//! Type-schema compiler.
//!
//! Turns [`TypeDescriptor`]s into JSON Schema fragments suitable for a tool's
//! `parameters` field.
//!
//! | Item | Role |
//! |------|------|
//! | [`TypeDescriptor`] | Runtime description of a value's shape |
//! | [`Describe`] | Maps Rust types to descriptors |
//! | [`compile`] | Descriptor to [`SchemaNode`], fails with [`SchemaError`] |
//! | [`json_schema_from_type`] | `schemars`-derived schemas for raw tools |

pub mod compiler;
pub mod describe;
pub mod descriptor;
pub mod generate;
pub mod node;

pub use compiler::{compile, SchemaError};
pub use describe::Describe;
pub use descriptor::{EnumDescriptor, FieldDescriptor, RecordDescriptor, TypeDescriptor};
pub use generate::{json_schema_from_type, parameters_from_type};
pub use node::{SchemaKind, SchemaNode};
