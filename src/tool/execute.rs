//! Tool execution.
//!
//! A call goes through four steps:
//!
//! 1. **Decode** text arguments into a JSON object; anything else, including
//!    empty text, is an argument decode error.
//! 2. **Merge** the tool's static defaults under the call arguments.
//! 3. **Bind** the merged arguments to the signature and invoke the body.
//! 4. **Normalize** the result: strings verbatim, everything else as JSON text.
//!
//! [`ToolExecutor::execute`] is the suspending primitive. Blocking bodies are
//! moved to the runtime's blocking pool. [`ToolExecutor::execute_blocking`] is
//! the bridge for synchronous callers: suspending bodies run on a dedicated
//! thread with a private runtime, so it is safe to call from inside a runtime.

use super::args::CallArgs;
use super::definition::{BoundCallable, ToolDefinition};
use super::error::{BindError, BoxError, CallResult, ToolError};
use super::function::Invoker;
use super::handlers::ToolExceptionHandlerManager;
use super::registry::{find_tool_by_name, ToolRegistry};
use crate::config::{ToolingConfig, DEFAULT_EXECUTOR_THREAD_NAME};
use crate::types::{RawArguments, ToolCallRequest, ToolCallResult};
use futures::FutureExt;
use serde_json::{Map, Value};
use std::any::Any;
use std::borrow::Cow;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Decode raw arguments into a mapping; mappings are borrowed as-is.
pub fn decode_arguments<'a>(
    tool_name: &str,
    arguments: &'a RawArguments,
) -> Result<Cow<'a, Map<String, Value>>, ToolError> {
    match arguments {
        RawArguments::Object(map) => Ok(Cow::Borrowed(map)),
        RawArguments::Text(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Ok(Cow::Owned(map)),
            Ok(other) => Err(ToolError::argument_decode(
                tool_name,
                text.as_str(),
                <serde_json::Error as serde::de::Error>::custom(format!(
                    "expected a JSON object, found {}",
                    json_type_name(&other)
                )),
            )),
            Err(source) => Err(ToolError::argument_decode(tool_name, text.as_str(), source)),
        },
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Static defaults overlaid by the call arguments.
pub fn merge_defaults(
    static_defaults: &Map<String, Value>,
    arguments: &Map<String, Value>,
) -> Map<String, Value> {
    let mut merged = static_defaults.clone();
    for (key, value) in arguments {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Canonical text form of a tool result.
pub fn normalize_result(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn bind(
    tool_name: &str,
    callable: &BoundCallable,
    merged: Map<String, Value>,
) -> Result<CallArgs, BindError> {
    if let Some(validator) = &callable.validator {
        let snapshot = Value::Object(merged.clone());
        validator.check(&snapshot)?;
    }

    let Some(signature) = &callable.signature else {
        return Ok(CallArgs::new(tool_name, merged, Map::new()));
    };

    let mut remaining = merged;
    let mut values = Map::new();
    for param in signature.named() {
        match remaining.remove(&param.name) {
            Some(value) => {
                values.insert(param.name.clone(), value);
            }
            None => match &param.default {
                Some(default) => {
                    values.insert(param.name.clone(), default.clone());
                }
                None => return Err(BindError::MissingArgument(param.name.clone())),
            },
        }
    }

    if !signature.accepts_extra_keywords() {
        if let Some(unexpected) = remaining.keys().next() {
            return Err(BindError::UnexpectedArgument(unexpected.clone()));
        }
    }

    Ok(CallArgs::new(tool_name, values, remaining))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

fn panicked(payload: Box<dyn Any + Send>) -> BoxError {
    Box::new(BindError::Panicked(panic_message(payload)))
}

/// Runs tool bodies and normalizes their results.
#[derive(Debug, Clone)]
pub struct ToolExecutor {
    thread_name: String,
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self {
            thread_name: DEFAULT_EXECUTOR_THREAD_NAME.to_string(),
        }
    }
}

impl ToolExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ToolingConfig) -> Self {
        Self {
            thread_name: config.executor_thread_name.clone(),
        }
    }

    /// Decode, merge and bind; returns the body to run with its arguments.
    fn prepare<'t>(
        &self,
        tool: &'t ToolDefinition,
        arguments: &RawArguments,
    ) -> Result<(&'t BoundCallable, CallArgs), ToolError> {
        let callable = tool.callable.as_deref().ok_or_else(|| {
            ToolError::execution(&tool.name, arguments.clone(), BindError::NotCallable)
        })?;
        let decoded = decode_arguments(&tool.name, arguments)?;
        let merged = merge_defaults(&tool.static_defaults, &decoded);
        let args = bind(&tool.name, callable, merged)
            .map_err(|e| ToolError::execution(&tool.name, arguments.clone(), e))?;
        Ok((callable, args))
    }

    fn finish(
        tool: &ToolDefinition,
        arguments: &RawArguments,
        outcome: CallResult<Value>,
    ) -> Result<String, ToolError> {
        outcome
            .map(normalize_result)
            .map_err(|failure| ToolError::from_failure(&tool.name, arguments, failure))
    }

    /// Run a tool from async code.
    ///
    /// Dropping the returned future stops waiting; a blocking body already
    /// handed to the blocking pool runs to completion regardless.
    pub async fn execute(
        &self,
        tool: &ToolDefinition,
        arguments: &RawArguments,
    ) -> Result<String, ToolError> {
        let (callable, args) = self.prepare(tool, arguments)?;
        tracing::debug!(tool = %tool.name, "executing tool");

        let outcome = match &callable.invoker {
            Invoker::Blocking(body) => {
                let body = Arc::clone(body);
                match tokio::runtime::Handle::try_current() {
                    Ok(handle) => match handle.spawn_blocking(move || body(args)).await {
                        Ok(outcome) => outcome,
                        Err(join) if join.is_panic() => Err(panicked(join.into_panic())),
                        Err(join) => Err(Box::new(join) as BoxError),
                    },
                    Err(_) => std::panic::catch_unwind(AssertUnwindSafe(|| body(args)))
                        .unwrap_or_else(|payload| Err(panicked(payload))),
                }
            }
            Invoker::Suspending(handler) => AssertUnwindSafe(handler.call(args))
                .catch_unwind()
                .await
                .unwrap_or_else(|payload| Err(panicked(payload))),
        };

        Self::finish(tool, arguments, outcome)
    }

    /// Run a tool from synchronous code, including threads that are already
    /// driving a runtime.
    pub fn execute_blocking(
        &self,
        tool: &ToolDefinition,
        arguments: &RawArguments,
    ) -> Result<String, ToolError> {
        let (callable, args) = self.prepare(tool, arguments)?;
        tracing::debug!(tool = %tool.name, "executing tool (blocking)");

        let outcome = match &callable.invoker {
            Invoker::Blocking(body) => std::panic::catch_unwind(AssertUnwindSafe(|| body(args)))
                .unwrap_or_else(|payload| Err(panicked(payload))),
            Invoker::Suspending(handler) => {
                let handler = Arc::clone(handler);
                let spawned = std::thread::Builder::new()
                    .name(self.thread_name.clone())
                    .spawn(move || -> CallResult<Value> {
                        let runtime = tokio::runtime::Builder::new_current_thread()
                            .enable_all()
                            .build()?;
                        runtime.block_on(handler.call(args))
                    });
                match spawned {
                    Ok(thread) => thread
                        .join()
                        .unwrap_or_else(|payload| Err(panicked(payload))),
                    Err(e) => Err(Box::new(e) as BoxError),
                }
            }
        };

        Self::finish(tool, arguments, outcome)
    }
}

/// Run the first tool named `name` in `tools`.
pub async fn execute_tool(
    tools: &[ToolDefinition],
    name: &str,
    arguments: &RawArguments,
) -> Result<String, ToolError> {
    let tool = find_tool_by_name(tools, name).ok_or_else(|| ToolError::does_not_exist(name))?;
    ToolExecutor::default().execute(tool, arguments).await
}

/// Blocking form of [`execute_tool`].
pub fn execute_tool_sync(
    tools: &[ToolDefinition],
    name: &str,
    arguments: &RawArguments,
) -> Result<String, ToolError> {
    let tool = find_tool_by_name(tools, name).ok_or_else(|| ToolError::does_not_exist(name))?;
    ToolExecutor::default().execute_blocking(tool, arguments)
}

/// Resolves tool calls against a registry and runs them.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    executor: ToolExecutor,
    handlers: Arc<ToolExceptionHandlerManager>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            executor: ToolExecutor::default(),
            handlers: Arc::new(ToolExceptionHandlerManager::new()),
        }
    }

    pub fn with_config(registry: Arc<ToolRegistry>, config: &ToolingConfig) -> Self {
        Self {
            executor: ToolExecutor::from_config(config),
            ..Self::new(registry)
        }
    }

    pub fn with_handlers(mut self, handlers: ToolExceptionHandlerManager) -> Self {
        self.handlers = Arc::new(handlers);
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn handlers(&self) -> &ToolExceptionHandlerManager {
        &self.handlers
    }

    pub async fn call(&self, request: &ToolCallRequest) -> Result<ToolCallResult, ToolError> {
        let tool = self.registry.get(&request.name)?;
        tracing::debug!(tool = %request.name, call_id = %request.id, "dispatching tool call");
        let content = self.executor.execute(tool, &request.arguments).await?;
        Ok(ToolCallResult::new(request.id.clone(), content))
    }

    pub fn call_blocking(&self, request: &ToolCallRequest) -> Result<ToolCallResult, ToolError> {
        let tool = self.registry.get(&request.name)?;
        tracing::debug!(tool = %request.name, call_id = %request.id, "dispatching tool call");
        let content = self.executor.execute_blocking(tool, &request.arguments)?;
        Ok(ToolCallResult::new(request.id.clone(), content))
    }

    /// Like [`call`](Self::call), but failures become handler messages.
    pub async fn call_handled(&self, request: &ToolCallRequest) -> ToolCallResult {
        match self.call(request).await {
            Ok(result) => result,
            Err(e) => ToolCallResult::new(request.id.clone(), self.handlers.handle(&e)),
        }
    }

    pub fn call_handled_blocking(&self, request: &ToolCallRequest) -> ToolCallResult {
        match self.call_blocking(request) {
            Ok(result) => result,
            Err(e) => ToolCallResult::new(request.id.clone(), self.handlers.handle(&e)),
        }
    }

    /// Run all calls concurrently; results follow the order of `requests`.
    pub async fn call_all(&self, requests: &[ToolCallRequest]) -> Vec<ToolCallResult> {
        futures::future::join_all(requests.iter().map(|r| self.call_handled(r))).await
    }
}
