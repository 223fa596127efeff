use crate::types::{MessageToolCall, ToolCallRequest};
use serde::{Deserialize, Serialize};

/// A tool call rebuilt from streamed deltas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledToolCall {
    pub index: u32,
    pub id: Option<String>,
    pub name: Option<String>,
    /// Concatenated argument text, not parsed.
    pub arguments: String,
}

impl AssembledToolCall {
    /// Arguments parsed as JSON; the raw text is kept when it does not parse.
    pub fn parsed_arguments(&self) -> serde_json::Value {
        let trimmed = self.arguments.trim();
        if trimmed.is_empty() {
            return serde_json::Value::Object(serde_json::Map::new());
        }
        serde_json::from_str(trimmed)
            .unwrap_or_else(|_| serde_json::Value::String(self.arguments.clone()))
    }

    /// The call as a dispatch request (missing id/name become empty strings).
    ///
    /// Providers stream calls without arguments as no argument deltas at all;
    /// blank argument text is sent as `{}` so such calls dispatch. The
    /// executor itself still rejects empty text as undecodable.
    pub fn to_request(&self) -> ToolCallRequest {
        let arguments = if self.arguments.trim().is_empty() {
            "{}".to_string()
        } else {
            self.arguments.clone()
        };
        ToolCallRequest::new(
            self.id.clone().unwrap_or_default(),
            self.name.clone().unwrap_or_default(),
            arguments,
        )
    }

    pub fn to_message_call(&self) -> MessageToolCall {
        MessageToolCall::function(
            self.id.clone().unwrap_or_default(),
            self.name.clone().unwrap_or_default(),
            self.arguments.clone(),
        )
    }
}

/// Collects tool call deltas into final calls, keyed by the call's index.
/// Calls keep the order in which their index was first seen; id and name are
/// taken from the first delta that carries them and never overwritten.
#[derive(Debug, Default)]
pub struct ToolCallAssembler {
    tool_calls: Vec<AssembledToolCall>,
}

impl ToolCallAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_delta(
        &mut self,
        index: u32,
        id: Option<String>,
        name: Option<String>,
        fragment: &str,
    ) {
        let pos = match self.tool_calls.iter().position(|t| t.index == index) {
            Some(pos) => pos,
            None => {
                self.tool_calls.push(AssembledToolCall {
                    index,
                    id: None,
                    name: None,
                    arguments: String::new(),
                });
                self.tool_calls.len() - 1
            }
        };

        let tc = &mut self.tool_calls[pos];
        if tc.id.is_none() {
            tc.id = id;
        }
        if tc.name.is_none() {
            tc.name = name;
        }
        tc.arguments.push_str(fragment);
    }

    pub fn len(&self) -> usize {
        self.tool_calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tool_calls.is_empty()
    }

    pub fn finalize(self) -> Vec<AssembledToolCall> {
        self.tool_calls
    }
}
