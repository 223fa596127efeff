//! Runtime type descriptors consumed by the schema compiler.

use serde::Serialize;
use serde_json::Value;

/// Description of a value's expected shape.
///
/// Descriptors are immutable and cheap to clone. They are usually produced by
/// [`Describe`](super::Describe), but hosts may assemble them by hand when a
/// parameter's shape does not map to a Rust type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    /// Unconstrained value; compiles to the permissive string fallback.
    Any,
    String,
    Integer,
    Float,
    Boolean,
    /// Binary blob transported as base64 text.
    Bytes,
    Date,
    DateTime,
    Time,
    /// The absence marker (`null` / `None`).
    None,
    /// Homogeneous sequence; `None` element means unparameterized.
    Sequence(Option<Box<TypeDescriptor>>),
    /// Unique-element collection.
    Set(Option<Box<TypeDescriptor>>),
    /// Fixed-length heterogeneous tuple.
    Tuple(Vec<TypeDescriptor>),
    /// Variable-length homogeneous tuple.
    VarTuple(Box<TypeDescriptor>),
    /// Key-value mapping described by its value type.
    Map(Option<Box<TypeDescriptor>>),
    Union(Vec<TypeDescriptor>),
    /// Fixed-choice enumeration, members in declaration order.
    Enum(EnumDescriptor),
    Record(RecordDescriptor),
    /// A type carrying a tag; string tags become descriptions.
    Annotated {
        inner: Box<TypeDescriptor>,
        tag: Value,
    },
}

impl TypeDescriptor {
    pub fn sequence_of(element: TypeDescriptor) -> Self {
        TypeDescriptor::Sequence(Some(Box::new(element)))
    }

    pub fn set_of(element: TypeDescriptor) -> Self {
        TypeDescriptor::Set(Some(Box::new(element)))
    }

    pub fn map_of(value: TypeDescriptor) -> Self {
        TypeDescriptor::Map(Some(Box::new(value)))
    }

    pub fn optional(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Union(vec![inner, TypeDescriptor::None])
    }

    pub fn union(alternatives: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        TypeDescriptor::Union(alternatives.into_iter().collect())
    }

    /// A literal set such as `"a" | "b" | "c"`.
    pub fn literal<I, V>(members: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        TypeDescriptor::Enum(EnumDescriptor::literal(members))
    }

    /// Attach a tag to this descriptor.
    pub fn annotated(self, tag: impl Into<Value>) -> Self {
        TypeDescriptor::Annotated {
            inner: Box::new(self),
            tag: tag.into(),
        }
    }

    /// Attach a human-readable description.
    pub fn described(self, description: impl Into<String>) -> Self {
        self.annotated(Value::String(description.into()))
    }

    /// Short human-readable name used in generated parameter descriptions.
    pub fn type_name(&self) -> String {
        match self {
            TypeDescriptor::Any => "any".to_string(),
            TypeDescriptor::String => "string".to_string(),
            TypeDescriptor::Integer => "integer".to_string(),
            TypeDescriptor::Float => "number".to_string(),
            TypeDescriptor::Boolean => "boolean".to_string(),
            TypeDescriptor::Bytes => "bytes".to_string(),
            TypeDescriptor::Date => "date".to_string(),
            TypeDescriptor::DateTime => "datetime".to_string(),
            TypeDescriptor::Time => "time".to_string(),
            TypeDescriptor::None => "null".to_string(),
            TypeDescriptor::Sequence(None) => "array".to_string(),
            TypeDescriptor::Sequence(Some(e)) => format!("array<{}>", e.type_name()),
            TypeDescriptor::Set(None) => "set".to_string(),
            TypeDescriptor::Set(Some(e)) => format!("set<{}>", e.type_name()),
            TypeDescriptor::Tuple(items) => {
                let names: Vec<String> = items.iter().map(|t| t.type_name()).collect();
                format!("tuple<{}>", names.join(", "))
            }
            TypeDescriptor::VarTuple(e) => format!("tuple<{}, ...>", e.type_name()),
            TypeDescriptor::Map(None) => "map".to_string(),
            TypeDescriptor::Map(Some(v)) => format!("map<string, {}>", v.type_name()),
            TypeDescriptor::Union(alts) => {
                let names: Vec<String> = alts.iter().map(|t| t.type_name()).collect();
                names.join(" | ")
            }
            TypeDescriptor::Enum(e) => e.name.clone().unwrap_or_else(|| "enum".to_string()),
            TypeDescriptor::Record(r) => r.name.clone(),
            TypeDescriptor::Annotated { inner, .. } => inner.type_name(),
        }
    }
}

/// Members of a fixed-choice enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDescriptor {
    /// Set for named enum types, `None` for anonymous literal sets.
    pub name: Option<String>,
    pub members: Vec<Value>,
}

impl EnumDescriptor {
    pub fn literal<I, V>(members: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            name: None,
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn named<I, V>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            name: Some(name.into()),
            members: members.into_iter().map(Into::into).collect(),
        }
    }
}

/// A structured record with named fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDescriptor {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub descriptor: TypeDescriptor,
    pub default: Option<Value>,
}

impl RecordDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a required field.
    pub fn field(mut self, name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            descriptor,
            default: None,
        });
        self
    }

    /// Add a field with a default value; defaulted fields are not required.
    ///
    /// A default that cannot be serialized is recorded as `null`, which still
    /// marks the field optional.
    pub fn field_with_default<D: Serialize>(
        mut self,
        name: impl Into<String>,
        descriptor: TypeDescriptor,
        default: D,
    ) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            descriptor,
            default: Some(serde_json::to_value(default).unwrap_or(Value::Null)),
        });
        self
    }

    pub fn into_descriptor(self) -> TypeDescriptor {
        TypeDescriptor::Record(self)
    }
}

impl From<RecordDescriptor> for TypeDescriptor {
    fn from(record: RecordDescriptor) -> Self {
        TypeDescriptor::Record(record)
    }
}

impl From<EnumDescriptor> for TypeDescriptor {
    fn from(e: EnumDescriptor) -> Self {
        TypeDescriptor::Enum(e)
    }
}
