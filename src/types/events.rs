//! Streamed response fragments

use serde::{Deserialize, Serialize};

/// One incremental piece of an assistant turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum MessageFragment {
    /// Partial content delta (text streaming)
    #[serde(rename = "TextDelta")]
    TextDelta { content: String },

    /// Reasoning delta (thinking process)
    #[serde(rename = "ReasoningDelta")]
    ReasoningDelta { content: String },

    /// Partial tool call, keyed by its position in the response
    #[serde(rename = "ToolCallArgumentDelta")]
    ToolCallArgumentDelta {
        index: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default)]
        arguments: String, // Partial JSON string
    },

    /// Usage statistics
    #[serde(rename = "UsageDelta")]
    UsageDelta { usage: serde_json::Value },

    /// Stream end
    #[serde(rename = "Terminal")]
    Terminal {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        finish_reason: Option<String>,
    },
}

impl MessageFragment {
    pub fn text(content: impl Into<String>) -> Self {
        MessageFragment::TextDelta {
            content: content.into(),
        }
    }

    pub fn reasoning(content: impl Into<String>) -> Self {
        MessageFragment::ReasoningDelta {
            content: content.into(),
        }
    }

    /// A tool-call delta carrying only argument text.
    pub fn arguments(index: u32, arguments: impl Into<String>) -> Self {
        MessageFragment::ToolCallArgumentDelta {
            index,
            id: None,
            name: None,
            arguments: arguments.into(),
        }
    }

    /// The opening tool-call delta that names the call.
    pub fn tool_call_start(index: u32, id: impl Into<String>, name: impl Into<String>) -> Self {
        MessageFragment::ToolCallArgumentDelta {
            index,
            id: Some(id.into()),
            name: Some(name.into()),
            arguments: String::new(),
        }
    }

    pub fn usage(usage: serde_json::Value) -> Self {
        MessageFragment::UsageDelta { usage }
    }

    pub fn terminal(finish_reason: Option<&str>) -> Self {
        MessageFragment::Terminal {
            finish_reason: finish_reason.map(str::to_string),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, MessageFragment::Terminal { .. })
    }
}
