//! Tool calling wire types in the function-calling envelope format

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Tool envelope handed to the model (`{"type": "function", "function": {...}}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    #[serde(rename = "type")]
    pub tool_type: String, // "function"
    pub function: FunctionDefinition,
}

impl ToolSpec {
    pub fn function(function: FunctionDefinition) -> Self {
        Self {
            tool_type: "function".to_string(),
            function,
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>, // JSON Schema
    /// Keys outside the standard three (e.g. `strict`) carried by raw schemas.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Arguments as they arrive from the model: JSON text or an already-decoded mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawArguments {
    Text(String),
    Object(Map<String, Value>),
}

impl RawArguments {
    pub fn empty() -> Self {
        RawArguments::Object(Map::new())
    }
}

impl Default for RawArguments {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for RawArguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawArguments::Text(text) => f.write_str(text),
            RawArguments::Object(map) => match serde_json::to_string(map) {
                Ok(s) => f.write_str(&s),
                Err(_) => f.write_str("{}"),
            },
        }
    }
}

impl From<&str> for RawArguments {
    fn from(text: &str) -> Self {
        RawArguments::Text(text.to_string())
    }
}

impl From<String> for RawArguments {
    fn from(text: String) -> Self {
        RawArguments::Text(text)
    }
}

impl From<Map<String, Value>> for RawArguments {
    fn from(map: Map<String, Value>) -> Self {
        RawArguments::Object(map)
    }
}

/// Objects become mappings, strings are treated as JSON text, and any other
/// value is kept as its JSON text (which later fails to decode as a mapping).
impl From<Value> for RawArguments {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => RawArguments::Object(map),
            Value::String(text) => RawArguments::Text(text),
            other => RawArguments::Text(other.to_string()),
        }
    }
}

/// Tool call (invocation from model)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    pub id: String,
    pub name: String,
    pub arguments: RawArguments,
}

impl ToolCallRequest {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<RawArguments>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// Tool result (response to tool call); content is always text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallResult {
    pub id: String,
    pub content: String,
}

impl ToolCallResult {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }

    /// The `tool` conversation entry answering the originating call.
    pub fn into_message(self) -> crate::types::ChatMessage {
        crate::types::ChatMessage::tool(self.id, self.content)
    }
}
