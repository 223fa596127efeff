use crate::pipeline::AssemblerError;
use crate::schema::SchemaError;
use crate::tool::{IntrospectionError, ToolError};
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "namespace_separator")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "tooling_config", "env")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the tooling runtime.
///
/// Registration-time failures (`Schema`, `Introspection`) are raised before any
/// request is sent; `Tool` failures happen per call and are recoverable.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Schema compilation error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Introspection error: {0}")]
    Introspection(#[from] IntrospectionError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("Message assembly error: {0}")]
    Assembler(#[from] AssemblerError),

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }

    /// The tool-call error, when this error happened while dispatching a call.
    pub fn as_tool_error(&self) -> Option<&ToolError> {
        match self {
            Error::Tool(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_renders_context() {
        let err = Error::configuration_with_context(
            "separator must not be empty",
            ErrorContext::new()
                .with_field_path("namespace_separator")
                .with_source("tooling_config"),
        );
        let rendered = err.to_string();
        assert!(rendered.contains("separator must not be empty"));
        assert!(rendered.contains("field: namespace_separator"));
        assert!(rendered.contains("source: tooling_config"));
        assert!(err.context().is_some());
    }

    #[test]
    fn test_tool_errors_are_transparent() {
        let err: Error = ToolError::does_not_exist("lookup").into();
        assert_eq!(err.to_string(), "tool `lookup` does not exist");
        assert!(err.as_tool_error().is_some());
    }
}
