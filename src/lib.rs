//! # ai-lib-tools
//!
//! Tool calling runtime for AI-Protocol hosts: exposes host functions as
//! model-callable tools and rebuilds streamed assistant turns.
//!
//! ## Overview
//!
//! The crate sits between application code and a (separate) transport layer.
//! The host registers functions, hands the generated JSON schemas to the model,
//! folds the streamed response back into one message and runs the tool calls
//! the model asked for.
//!
//! ## Core Philosophy
//!
//! - **Fail Fast at Registration**: Schema and documentation problems surface before any request is sent
//! - **Recoverable Calls**: Per-call failures are typed and can be turned into messages for the model
//! - **Async First**: The suspending form is the primitive; a blocking bridge is always available
//! - **Transport-Agnostic**: No HTTP, no provider shaping; only wire-format values go in and out
//!
//! ## Quick Start
//!
//! ```rust
//! use ai_lib_tools::pipeline::MessageAssembler;
//! use ai_lib_tools::tool::{CallArgs, Dispatcher, ToolFn, ToolRegistry};
//! use ai_lib_tools::types::MessageFragment;
//!
//! #[tokio::main]
//! async fn main() -> ai_lib_tools::Result<()> {
//!     let add = ToolFn::builder("add")
//!         .doc("Add two integers.")
//!         .param::<i64>("a")
//!         .param::<i64>("b")
//!         .sync(|args: CallArgs| Ok(args.get::<i64>("a")? + args.get::<i64>("b")?));
//!
//!     let registry = ToolRegistry::build(vec![add])?;
//!     let _specs = registry.specs(); // attach to the outbound request
//!
//!     // Fragments as produced by the transport's streaming decoder
//!     let mut assembler = MessageAssembler::new();
//!     assembler.collect(MessageFragment::tool_call_start(0, "call_1", "add"))?;
//!     assembler.collect(MessageFragment::arguments(0, r#"{"a": 5, "b": 3}"#))?;
//!     let message = assembler.finalize()?;
//!
//!     let dispatcher = Dispatcher::new(registry.into_shared());
//!     for call in &message.tool_calls {
//!         let result = dispatcher.call_handled(&call.to_request()).await;
//!         assert_eq!(result.content, "8");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`schema`] | Type descriptors and the JSON Schema compiler |
//! | [`tool`] | Tool definitions, registry, execution and error handlers |
//! | [`pipeline`] | Streaming message assembly |
//! | [`types`] | Wire types (tool envelopes, calls, fragments, messages) |
//! | [`config`] | Runtime configuration |

pub mod config;
pub mod pipeline;
pub mod schema;
pub mod tool;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use config::ToolingConfig;
pub use pipeline::{collect_stream, AssembledMessage, MessageAssembler};
pub use schema::{compile, Describe, SchemaNode, TypeDescriptor};
pub use tool::{
    execute_tool, execute_tool_sync, find_tool_by_name, prepare_tools, CallArgs, Dispatcher,
    ToolDefinition, ToolError, ToolExceptionHandlerManager, ToolExecutor, ToolFn, ToolRegistry,
    ToolSource, Toolset,
};
pub use types::{
    events::MessageFragment,
    message::ChatMessage,
    tool::{RawArguments, ToolCallRequest, ToolCallResult, ToolSpec},
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
