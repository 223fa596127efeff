//! Conversation messages in the function-calling format

use serde::{Deserialize, Serialize};

/// A conversation entry, serialized with its `role` tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatMessage {
    System {
        content: String,
    },
    User {
        content: String,
    },
    Assistant {
        #[serde(default)]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<MessageToolCall>,
    },
    Tool {
        tool_call_id: String,
        content: String,
    },
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        ChatMessage::System {
            content: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        ChatMessage::User {
            content: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        ChatMessage::Assistant {
            content: Some(text.into()),
            tool_calls: Vec::new(),
        }
    }

    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        ChatMessage::Tool {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
        }
    }

    pub fn role(&self) -> MessageRole {
        match self {
            ChatMessage::System { .. } => MessageRole::System,
            ChatMessage::User { .. } => MessageRole::User,
            ChatMessage::Assistant { .. } => MessageRole::Assistant,
            ChatMessage::Tool { .. } => MessageRole::Tool,
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Tool,
}

/// A tool call recorded on an assistant message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String, // "function"
    pub function: FunctionCall,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

impl MessageToolCall {
    pub fn function(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            call_type: "function".to_string(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }
}

/// Split a leading `<think>` or `<thinking>` block off assistant text.
///
/// Returns the remaining text and the block's inner content. Text that does not
/// start with an opening tag, or whose tag is never closed by its own closing
/// tag, is returned unchanged. Only the first block is taken; the remainder is
/// not trimmed.
pub fn extract_thinking_content(text: &str) -> (&str, Option<&str>) {
    for (open, close) in [("<think>", "</think>"), ("<thinking>", "</thinking>")] {
        if let Some(rest) = text.strip_prefix(open) {
            if let Some(end) = rest.find(close) {
                return (&rest[end + close.len()..], Some(&rest[..end]));
            }
        }
    }
    (text, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_messages_serialize_with_role_tag() {
        assert_eq!(
            serde_json::to_value(ChatMessage::tool("call_1", "8")).unwrap(),
            json!({"role": "tool", "tool_call_id": "call_1", "content": "8"})
        );

        let assistant = ChatMessage::Assistant {
            content: None,
            tool_calls: vec![MessageToolCall::function("call_1", "add", "{\"a\":3}")],
        };
        assert_eq!(
            serde_json::to_value(&assistant).unwrap(),
            json!({
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "add", "arguments": "{\"a\":3}"}
                }]
            })
        );
        assert_eq!(assistant.role(), MessageRole::Assistant);
    }

    #[test]
    fn test_plain_assistant_omits_tool_calls() {
        let value = serde_json::to_value(ChatMessage::assistant("hi")).unwrap();
        assert_eq!(value, json!({"role": "assistant", "content": "hi"}));
    }

    #[test]
    fn test_extract_think_block() {
        assert_eq!(
            extract_thinking_content("<think>thinking part</think>actual content"),
            ("actual content", Some("thinking part"))
        );
        assert_eq!(
            extract_thinking_content("<thinking>thinking part</thinking>actual content"),
            ("actual content", Some("thinking part"))
        );
    }

    #[test]
    fn test_extract_without_block() {
        assert_eq!(
            extract_thinking_content("just actual content"),
            ("just actual content", None)
        );
    }

    #[test]
    fn test_extract_unclosed_block_is_text() {
        let text = "<think>thinking part actual content";
        assert_eq!(extract_thinking_content(text), (text, None));
    }

    #[test]
    fn test_extract_takes_first_block_only() {
        assert_eq!(
            extract_thinking_content("<think>first</think>middle<think>second</think>end"),
            ("middle<think>second</think>end", Some("first"))
        );
    }

    #[test]
    fn test_extract_keeps_newlines() {
        assert_eq!(
            extract_thinking_content("<think>\nline1\nline2\n</think>content"),
            ("content", Some("\nline1\nline2\n"))
        );
    }

    #[test]
    fn test_extract_mismatched_tags_is_text() {
        let text = "<think>content</thinking>";
        assert_eq!(extract_thinking_content(text), (text, None));
    }

    #[test]
    fn test_extract_ignores_block_mid_text() {
        let text = "some content <think>thinking part</think> more content";
        assert_eq!(extract_thinking_content(text), (text, None));
    }
}
