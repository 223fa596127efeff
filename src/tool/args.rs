//! Bound arguments handed to tool bodies.
//!
//! ```rust
//! use ai_lib_tools::tool::CallArgs;
//! use serde_json::json;
//!
//! let args = CallArgs::from_value("lookup", json!({"query": "rust", "limit": 3}));
//! let query: String = args.get("query").unwrap();
//! let limit: Option<u32> = args.get_opt("limit").unwrap();
//! assert_eq!(query, "rust");
//! assert_eq!(limit, Some(3));
//! ```

use base64::Engine as _;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArgumentError {
    #[error("missing argument `{0}`")]
    Missing(String),

    #[error("argument `{name}` has the wrong shape: {source}")]
    Invalid {
        name: String,
        source: serde_json::Error,
    },

    #[error("argument `{name}` is not valid base64: {source}")]
    Encoding {
        name: String,
        source: base64::DecodeError,
    },
}

/// Arguments bound to a tool's declared parameters.
///
/// Keys that matched no declared parameter are only kept when the tool accepts
/// arbitrary keyword arguments; they are exposed through [`CallArgs::extra`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    tool_name: String,
    values: Map<String, Value>,
    extra: Map<String, Value>,
}

impl CallArgs {
    pub fn new(
        tool_name: impl Into<String>,
        values: Map<String, Value>,
        extra: Map<String, Value>,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            values,
            extra,
        }
    }

    /// Wrap an object value without binding; non-objects yield no arguments.
    pub fn from_value(tool_name: impl Into<String>, value: Value) -> Self {
        let values = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::new(tool_name, values, Map::new())
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    /// Decode a declared argument.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<T, ArgumentError> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| ArgumentError::Missing(name.to_string()))?;
        T::deserialize(value).map_err(|source| ArgumentError::Invalid {
            name: name.to_string(),
            source,
        })
    }

    /// Decode an argument that may be absent or `null`.
    pub fn get_opt<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, ArgumentError> {
        match self.values.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::deserialize(value)
                .map(Some)
                .map_err(|source| ArgumentError::Invalid {
                    name: name.to_string(),
                    source,
                }),
        }
    }

    /// Decode a base64-encoded binary argument.
    pub fn bytes(&self, name: &str) -> Result<Bytes, ArgumentError> {
        let encoded: String = self.get(name)?;
        base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map(Bytes::from)
            .map_err(|source| ArgumentError::Encoding {
                name: name.to_string(),
                source,
            })
    }

    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Keyword arguments collected by a catch-all parameter.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.values
    }
}
