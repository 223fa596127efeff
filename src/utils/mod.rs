pub mod tool_call_assembler;

pub use tool_call_assembler::{AssembledToolCall, ToolCallAssembler};
