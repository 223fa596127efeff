//! Tool-call error taxonomy.

use crate::types::RawArguments;
use std::fmt;
use thiserror::Error;

/// Opaque failure raised by a tool body.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result returned by tool bodies.
pub type CallResult<T> = std::result::Result<T, BoxError>;

/// Per-call failures.
///
/// Every variant carries the tool name so callers can report the failure back to
/// the model; decode and execution failures also keep the offending arguments.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool `{name}` does not exist")]
    DoesNotExist { name: String },

    #[error("failed to decode arguments for tool `{tool_name}`: {source}")]
    ArgumentDecode {
        tool_name: String,
        arguments: String,
        source: serde_json::Error,
    },

    #[error("tool `{tool_name}` failed: {source}")]
    Execution {
        tool_name: String,
        arguments: RawArguments,
        source: BoxError,
    },
}

/// Classification used to route errors to handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolErrorKind {
    DoesNotExist,
    ArgumentDecode,
    Execution,
}

impl ToolErrorKind {
    pub const ALL: [ToolErrorKind; 3] = [
        ToolErrorKind::DoesNotExist,
        ToolErrorKind::ArgumentDecode,
        ToolErrorKind::Execution,
    ];

    /// Stable name reported in handler fallbacks.
    pub fn name(&self) -> &'static str {
        match self {
            ToolErrorKind::DoesNotExist => "ToolDoesNotExistError",
            ToolErrorKind::ArgumentDecode => "ToolArgumentDecodeError",
            ToolErrorKind::Execution => "ToolExecutionError",
        }
    }
}

impl fmt::Display for ToolErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ToolError {
    pub fn does_not_exist(name: impl Into<String>) -> Self {
        ToolError::DoesNotExist { name: name.into() }
    }

    pub fn argument_decode(
        tool_name: impl Into<String>,
        arguments: impl Into<String>,
        source: serde_json::Error,
    ) -> Self {
        ToolError::ArgumentDecode {
            tool_name: tool_name.into(),
            arguments: arguments.into(),
            source,
        }
    }

    pub fn execution(
        tool_name: impl Into<String>,
        arguments: RawArguments,
        source: impl Into<BoxError>,
    ) -> Self {
        ToolError::Execution {
            tool_name: tool_name.into(),
            arguments,
            source: source.into(),
        }
    }

    /// Classify a failure raised while running a tool body.
    ///
    /// A body that already failed with a `ToolError` (e.g. a nested dispatch)
    /// keeps its classification; anything else becomes an execution error.
    pub fn from_failure(tool_name: &str, arguments: &RawArguments, failure: BoxError) -> Self {
        match failure.downcast::<ToolError>() {
            Ok(tool_error) => *tool_error,
            Err(other) => ToolError::Execution {
                tool_name: tool_name.to_string(),
                arguments: arguments.clone(),
                source: other,
            },
        }
    }

    pub fn kind(&self) -> ToolErrorKind {
        match self {
            ToolError::DoesNotExist { .. } => ToolErrorKind::DoesNotExist,
            ToolError::ArgumentDecode { .. } => ToolErrorKind::ArgumentDecode,
            ToolError::Execution { .. } => ToolErrorKind::Execution,
        }
    }

    pub fn tool_name(&self) -> &str {
        match self {
            ToolError::DoesNotExist { name } => name,
            ToolError::ArgumentDecode { tool_name, .. } => tool_name,
            ToolError::Execution { tool_name, .. } => tool_name,
        }
    }

    /// The arguments as received, rendered as text.
    pub fn arguments(&self) -> Option<String> {
        match self {
            ToolError::DoesNotExist { .. } => None,
            ToolError::ArgumentDecode { arguments, .. } => Some(arguments.clone()),
            ToolError::Execution { arguments, .. } => Some(arguments.to_string()),
        }
    }
}

/// Raised when a call cannot be bound to the tool's signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("missing required argument `{0}`")]
    MissingArgument(String),

    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),

    #[error("arguments do not match the parameter schema: {0}")]
    SchemaViolation(String),

    #[error("tool has no local implementation")]
    NotCallable,

    #[error("tool body panicked: {0}")]
    Panicked(String),
}
