//! # Types Module
//!
//! Wire types exchanged with the host transport: tool envelopes, tool calls and
//! results, streamed fragments and conversation messages.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ToolSpec`] | `{"type": "function", "function": {...}}` envelope for the model |
//! | [`ToolCallRequest`] | Tool call extracted from a model response |
//! | [`ToolCallResult`] | Text result answering a tool call |
//! | [`MessageFragment`] | One streamed piece of an assistant turn |
//! | [`ChatMessage`] | Conversation entry (system, user, assistant, tool) |
//!
//! ## Submodules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`events`] | Streamed fragment variants |
//! | [`message`] | Conversation messages |
//! | [`tool`] | Tool/function calling types |
//!
//! ## Example
//!
//! ```rust
//! use ai_lib_tools::types::{ChatMessage, ToolCallResult};
//!
//! let result = ToolCallResult::new("call_1", "8");
//! let message = result.into_message();
//! assert_eq!(message, ChatMessage::tool("call_1", "8"));
//! ```

pub mod events;
pub mod message;
pub mod tool;

pub use events::MessageFragment;
pub use message::{
    extract_thinking_content, ChatMessage, FunctionCall, MessageRole, MessageToolCall,
};
pub use tool::{FunctionDefinition, RawArguments, ToolCallRequest, ToolCallResult, ToolSpec};
