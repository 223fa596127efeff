//! Tool definition, registration and execution.
//!
//! ## Overview
//!
//! Host functions become tools in three steps:
//!
//! 1. Describe the callable with a [`ToolFn`] (name, documentation, typed parameters).
//! 2. Build a [`ToolRegistry`] from [`ToolSource`]s; hand [`ToolRegistry::specs`] to the model.
//! 3. Run the model's tool calls through a [`Dispatcher`] and feed the results back.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ToolFn`] | Callable plus parameter metadata |
//! | [`ToolDefinition`] | Registered tool (schema + optional implementation) |
//! | [`ToolRegistry`] | Ordered, name-resolvable tool collection |
//! | [`ToolExecutor`] | Runs one tool (suspending and blocking forms) |
//! | [`Dispatcher`] | Resolves and runs tool calls, optionally through handlers |
//! | [`ToolExceptionHandlerManager`] | Maps [`ToolErrorKind`]s to model-facing messages |
//!
//! ## Example
//!
//! ```rust
//! use ai_lib_tools::tool::{CallArgs, Dispatcher, ToolFn, ToolRegistry};
//! use ai_lib_tools::types::ToolCallRequest;
//!
//! let add = ToolFn::builder("add")
//!     .doc("Add two integers.")
//!     .param::<i64>("a")
//!     .param::<i64>("b")
//!     .sync(|args: CallArgs| Ok(args.get::<i64>("a")? + args.get::<i64>("b")?));
//!
//! let registry = ToolRegistry::build(vec![add]).unwrap().into_shared();
//! let dispatcher = Dispatcher::new(registry);
//! let result = dispatcher
//!     .call_blocking(&ToolCallRequest::new("call_1", "add", r#"{"a": 5, "b": 3}"#))
//!     .unwrap();
//! assert_eq!(result.content, "8");
//! ```

pub mod args;
pub mod definition;
pub mod error;
pub mod execute;
pub mod function;
pub mod handlers;
pub mod introspect;
pub mod registry;
pub mod toolset;
pub mod validate;

pub use args::{ArgumentError, CallArgs};
pub use definition::{empty_parameters, ToolDefinition};
pub use error::{BindError, BoxError, CallResult, ToolError, ToolErrorKind};
pub use execute::{
    decode_arguments, execute_tool, execute_tool_sync, merge_defaults, normalize_result,
    Dispatcher, ToolExecutor,
};
pub use function::{
    BlockingBody, Invoker, Param, ParamKind, Signature, ToolFn, ToolFnBuilder, ToolHandler,
};
pub use handlers::{ExceptionHandler, ToolExceptionHandlerManager};
pub use introspect::{introspect, normalize_description, IntrospectionError};
pub use registry::{find_tool_by_name, prepare_tools, raw_tool_from_type, ToolRegistry, ToolSource};
pub use toolset::{FnToolset, Toolset};
pub use validate::ArgumentValidator;
