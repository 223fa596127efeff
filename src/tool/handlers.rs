//! Per-kind handlers turning tool errors into messages for the model.
//!
//! ```rust
//! use ai_lib_tools::tool::{ToolError, ToolErrorKind, ToolExceptionHandlerManager};
//!
//! let handlers = ToolExceptionHandlerManager::new()
//!     .register(ToolErrorKind::DoesNotExist, |e| format!("No such tool: {}", e.tool_name()));
//!
//! let message = handlers.handle(&ToolError::does_not_exist("ghost"));
//! assert_eq!(message, "No such tool: ghost");
//! ```

use super::error::{ToolError, ToolErrorKind};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Produces the tool-result text reported for a failed call.
pub type ExceptionHandler = Arc<dyn Fn(&ToolError) -> String + Send + Sync>;

#[derive(Clone, Default)]
pub struct ToolExceptionHandlerManager {
    handlers: HashMap<ToolErrorKind, ExceptionHandler>,
}

impl ToolExceptionHandlerManager {
    /// A manager with no handlers; every error takes the fallback path.
    pub fn new() -> Self {
        Self::default()
    }

    /// A manager with readable messages for every kind.
    pub fn with_default_handlers() -> Self {
        Self::new()
            .register(ToolErrorKind::DoesNotExist, |e| {
                format!(
                    "Tool `{}` does not exist. Use one of the provided tools.",
                    e.tool_name()
                )
            })
            .register(ToolErrorKind::ArgumentDecode, |e| match e {
                ToolError::ArgumentDecode { source, .. } => format!(
                    "Arguments for tool `{}` are not a valid JSON object: {}",
                    e.tool_name(),
                    source
                ),
                other => other.to_string(),
            })
            .register(ToolErrorKind::Execution, |e| match e {
                ToolError::Execution { source, .. } => {
                    format!("Tool `{}` failed: {}", e.tool_name(), source)
                }
                other => other.to_string(),
            })
    }

    /// Builder form of [`set_handler`](Self::set_handler).
    pub fn register<F>(mut self, kind: ToolErrorKind, handler: F) -> Self
    where
        F: Fn(&ToolError) -> String + Send + Sync + 'static,
    {
        self.set_handler(kind, handler);
        self
    }

    /// Install the handler for `kind`, replacing any previous one.
    pub fn set_handler<F>(&mut self, kind: ToolErrorKind, handler: F)
    where
        F: Fn(&ToolError) -> String + Send + Sync + 'static,
    {
        self.handlers.insert(kind, Arc::new(handler));
    }

    pub fn get_handler(&self, kind: ToolErrorKind) -> Option<ExceptionHandler> {
        self.handlers.get(&kind).cloned()
    }

    pub fn remove_handler(&mut self, kind: ToolErrorKind) -> Option<ExceptionHandler> {
        self.handlers.remove(&kind)
    }

    /// Message for `error`; unhandled kinds are logged and get a generic message.
    pub fn handle(&self, error: &ToolError) -> String {
        match self.handlers.get(&error.kind()) {
            Some(handler) => handler(error),
            None => {
                tracing::warn!(kind = %error.kind(), error = %error, "Unhandled tool exception");
                format!("Unhandled tool exception: {}: {}", error.kind(), error)
            }
        }
    }
}

impl fmt::Debug for ToolExceptionHandlerManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&'static str> = self.handlers.keys().map(|k| k.name()).collect();
        kinds.sort_unstable();
        f.debug_struct("ToolExceptionHandlerManager")
            .field("handlers", &kinds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawArguments;

    #[test]
    fn test_unregistered_kind_falls_back() {
        let manager = ToolExceptionHandlerManager::new();
        let message = manager.handle(&ToolError::does_not_exist("ghost"));
        assert!(message.contains("Unhandled tool exception"));
        assert!(message.contains("ToolDoesNotExistError"));
        assert!(message.contains("ghost"));
    }

    #[test]
    fn test_handlers_can_be_replaced_and_removed() {
        let mut manager = ToolExceptionHandlerManager::new()
            .register(ToolErrorKind::Execution, |_| "first".to_string());
        manager.set_handler(ToolErrorKind::Execution, |_| "second".to_string());

        let err = ToolError::execution("t", RawArguments::empty(), "boom");
        assert_eq!(manager.handle(&err), "second");
        assert!(manager.get_handler(ToolErrorKind::Execution).is_some());
        assert!(manager.get_handler(ToolErrorKind::ArgumentDecode).is_none());

        manager.remove_handler(ToolErrorKind::Execution);
        assert!(manager.handle(&err).starts_with("Unhandled tool exception: ToolExecutionError"));
    }

    #[test]
    fn test_default_handlers_cover_every_kind() {
        let manager = ToolExceptionHandlerManager::with_default_handlers();
        for kind in ToolErrorKind::ALL {
            assert!(manager.get_handler(kind).is_some());
        }
        let err = ToolError::execution("add", RawArguments::empty(), "overflow");
        assert_eq!(manager.handle(&err), "Tool `add` failed: overflow");
    }
}
