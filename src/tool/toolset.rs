//! Named groups of tools sharing state.

use super::args::CallArgs;
use super::error::CallResult;
use super::function::{ToolFn, ToolFnBuilder};
use serde::Serialize;
use std::sync::Arc;

/// A group of tools registered together under a common name.
pub trait Toolset: Send + Sync {
    /// Group name, used as the namespace of member tools.
    fn name(&self) -> &str;

    /// Member tools, in registration order.
    fn tools(&self) -> Vec<ToolFn>;

    /// Registered name of a member tool.
    fn format_tool_name(&self, tool_name: &str, separator: &str) -> String {
        format!("{}{}{}", self.name(), separator, tool_name)
    }
}

/// A [`Toolset`] assembled from [`ToolFn`]s.
///
/// ```rust
/// use ai_lib_tools::tool::{FnToolset, ToolFn, Toolset};
/// use std::sync::atomic::{AtomicI64, Ordering};
/// use std::sync::Arc;
///
/// let counter = Arc::new(AtomicI64::new(0));
/// let toolset = FnToolset::new("Counter").method(
///     &counter,
///     ToolFn::builder("increment").doc("Increment the counter."),
///     |counter, _args| Ok(counter.fetch_add(1, Ordering::SeqCst) + 1),
/// );
/// assert_eq!(toolset.tools().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FnToolset {
    name: String,
    tools: Vec<ToolFn>,
}

impl FnToolset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tools: Vec::new(),
        }
    }

    pub fn tool(mut self, tool: ToolFn) -> Self {
        self.tools.push(tool);
        self
    }

    /// Add a blocking tool whose body receives the shared state.
    ///
    /// The state is the tool's implicit receiver and never appears in its schema.
    pub fn method<S, F, R>(mut self, state: &Arc<S>, builder: ToolFnBuilder, f: F) -> Self
    where
        S: Send + Sync + 'static,
        F: Fn(&S, CallArgs) -> CallResult<R> + Send + Sync + 'static,
        R: Serialize,
    {
        let state = Arc::clone(state);
        self.tools
            .push(builder.receiver("self").sync(move |args| f(&state, args)));
        self
    }

    pub fn into_arc(self) -> Arc<dyn Toolset> {
        Arc::new(self)
    }
}

impl Toolset for FnToolset {
    fn name(&self) -> &str {
        &self.name
    }

    fn tools(&self) -> Vec<ToolFn> {
        self.tools.clone()
    }
}
