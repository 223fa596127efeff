//! Registered tool definitions.

use super::function::{Invoker, Signature};
use super::introspect::IntrospectionError;
use super::validate::ArgumentValidator;
use crate::types::{FunctionDefinition, ToolSpec};
use serde_json::{json, Map, Value};
use std::fmt;
use std::sync::Arc;

/// The local implementation of a tool plus what is needed to bind calls to it.
#[derive(Debug)]
pub(crate) struct BoundCallable {
    /// `None` passes every argument through unchanged.
    pub(crate) signature: Option<Signature>,
    pub(crate) invoker: Invoker,
    pub(crate) validator: Option<ArgumentValidator>,
}

/// A tool as registered: metadata for the model plus an optional implementation.
///
/// Cloning is cheap; the implementation is shared behind an `Arc`.
#[derive(Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON object schema of the arguments.
    pub parameters: Value,
    /// Arguments merged under every call (call arguments win).
    pub static_defaults: Map<String, Value>,
    pub(crate) callable: Option<Arc<BoundCallable>>,
    /// Set for externally described tools; rendered verbatim.
    pub(crate) raw: Option<FunctionDefinition>,
}

/// `{"type": "object", "properties": {}, "required": []}`
pub fn empty_parameters() -> Value {
    json!({"type": "object", "properties": {}, "required": []})
}

impl ToolDefinition {
    /// A definition without a local implementation.
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            static_defaults: Map::new(),
            callable: None,
            raw: None,
        }
    }

    /// Attach an implementation that receives the arguments unbound.
    pub fn with_invoker(mut self, invoker: Invoker) -> Self {
        self.callable = Some(Arc::new(BoundCallable {
            signature: None,
            invoker,
            validator: None,
        }));
        self
    }

    pub(crate) fn with_callable(mut self, callable: BoundCallable) -> Self {
        self.callable = Some(Arc::new(callable));
        self
    }

    pub fn with_static_defaults(mut self, defaults: Map<String, Value>) -> Self {
        self.static_defaults = defaults;
        self
    }

    /// Build from an externally supplied function schema.
    ///
    /// Accepts either the bare function object (`{"name", "description",
    /// "parameters", ...}`) or a full `{"type": "function", "function": {...}}`
    /// envelope. The object must carry a string `name`.
    pub fn from_raw(raw: Value) -> Result<Self, IntrospectionError> {
        let function = match raw {
            Value::Object(mut map) if map.get("type") == Some(&json!("function")) => {
                match map.remove("function") {
                    Some(inner) => inner,
                    None => Value::Object(map),
                }
            }
            other => other,
        };

        match function.get("name") {
            Some(Value::String(name)) if !name.is_empty() => {}
            _ => {
                return Err(IntrospectionError::InvalidRawSchema {
                    reason: "missing string `name`".to_string(),
                })
            }
        }

        let function: FunctionDefinition = serde_json::from_value(function).map_err(|e| {
            IntrospectionError::InvalidRawSchema {
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            name: function.name.clone(),
            description: function.description.clone().unwrap_or_default(),
            parameters: function
                .parameters
                .clone()
                .unwrap_or_else(empty_parameters),
            static_defaults: Map::new(),
            callable: None,
            raw: Some(function),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        if let Some(raw) = self.raw.as_mut() {
            raw.name = self.name.clone();
        }
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        if let Some(raw) = self.raw.as_mut() {
            raw.description = Some(self.description.clone());
        }
        self
    }

    /// Whether the tool has a local implementation.
    pub fn is_callable(&self) -> bool {
        self.callable.is_some()
    }

    pub fn is_raw(&self) -> bool {
        self.raw.is_some()
    }

    pub fn is_suspending(&self) -> bool {
        self.callable
            .as_ref()
            .map(|c| c.invoker.is_suspending())
            .unwrap_or(false)
    }

    /// The function-calling envelope handed to the model.
    pub fn to_spec(&self) -> ToolSpec {
        match &self.raw {
            Some(raw) => ToolSpec::function(raw.clone()),
            None => ToolSpec::function(FunctionDefinition {
                name: self.name.clone(),
                description: Some(self.description.clone()),
                parameters: Some(self.parameters.clone()),
                extra: Map::new(),
            }),
        }
    }
}

impl fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .field("static_defaults", &self.static_defaults)
            .field("callable", &self.is_callable())
            .field("raw", &self.is_raw())
            .finish()
    }
}
