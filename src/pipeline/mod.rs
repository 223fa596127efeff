//! # Streaming Message Assembly
//!
//! Rebuilds a complete assistant turn from the fragments a streaming transport
//! emits, one fragment per network frame.
//!
//! ## Pipeline Stages
//!
//! ```text
//! Transport frames → MessageFragment → MessageAssembler → AssembledMessage
//!                        │                   │
//!                   TextDelta,           text / reasoning buffers,
//!                   ToolCallArgument-    tool calls by index,
//!                   Delta, Usage...      usage snapshot
//! ```
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`MessageAssembler`] | `Open` → `Finalized` state machine, one per response turn |
//! | [`AssembledMessage`] | Final text, reasoning, tool calls and usage |
//! | [`collect_stream`] | Drains a fragment stream up to its terminal fragment |
//!
//! ## Example
//!
//! ```rust
//! use ai_lib_tools::pipeline::MessageAssembler;
//! use ai_lib_tools::types::MessageFragment;
//!
//! let mut assembler = MessageAssembler::new();
//! assembler.collect(MessageFragment::tool_call_start(0, "c1", "f")).unwrap();
//! assembler.collect(MessageFragment::arguments(0, "{\"x\":")).unwrap();
//! assembler.collect(MessageFragment::arguments(0, "1}")).unwrap();
//!
//! let message = assembler.finalize().unwrap();
//! assert_eq!(message.tool_calls[0].arguments, "{\"x\":1}");
//! ```

pub mod accumulate;

pub use accumulate::{
    collect_stream, AssembledMessage, AssemblerError, AssemblerState, MessageAssembler,
};
