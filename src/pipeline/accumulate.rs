use crate::types::{extract_thinking_content, ChatMessage, MessageFragment};
use crate::utils::tool_call_assembler::{AssembledToolCall, ToolCallAssembler};
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblerError {
    #[error("assembler already finalized; use one assembler per response turn")]
    Finalized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblerState {
    Open,
    Finalized,
}

/// One complete assistant turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssembledMessage {
    /// `None` when no text arrived at all.
    pub text: Option<String>,
    pub reasoning: Option<String>,
    pub tool_calls: Vec<AssembledToolCall>,
    pub usage: Option<Value>,
    pub finish_reason: Option<String>,
}

impl AssembledMessage {
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    /// Move a leading `<think>`/`<thinking>` block of the text into `reasoning`.
    ///
    /// Inline thinking is appended after any reasoning that arrived as deltas.
    /// Text left empty by the extraction becomes `None`.
    pub fn extract_thinking(&mut self) {
        let Some(text) = self.text.as_deref() else {
            return;
        };
        let (rest, Some(thinking)) = extract_thinking_content(text) else {
            return;
        };
        let (rest, thinking) = (rest.to_string(), thinking.to_string());
        match self.reasoning.as_mut() {
            Some(reasoning) => reasoning.push_str(&thinking),
            None => self.reasoning = Some(thinking),
        }
        self.text = non_empty(rest);
    }

    /// The assistant conversation entry for this turn.
    pub fn into_message(self) -> ChatMessage {
        ChatMessage::Assistant {
            content: self.text,
            tool_calls: self
                .tool_calls
                .iter()
                .map(AssembledToolCall::to_message_call)
                .collect(),
        }
    }
}

/// Folds streamed fragments of a single response turn into an [`AssembledMessage`].
///
/// Text and reasoning are appended in arrival order, tool-call deltas are merged
/// by index, usage is replaced by the latest snapshot. After [`finalize`] the
/// assembler rejects further input.
///
/// [`finalize`]: MessageAssembler::finalize
#[derive(Debug)]
pub struct MessageAssembler {
    state: AssemblerState,
    text: String,
    reasoning: String,
    tool_calls: ToolCallAssembler,
    usage: Option<Value>,
    finish_reason: Option<String>,
    fragments: usize,
}

impl Default for MessageAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageAssembler {
    pub fn new() -> Self {
        Self {
            state: AssemblerState::Open,
            text: String::new(),
            reasoning: String::new(),
            tool_calls: ToolCallAssembler::new(),
            usage: None,
            finish_reason: None,
            fragments: 0,
        }
    }

    pub fn state(&self) -> AssemblerState {
        self.state
    }

    pub fn collect(&mut self, fragment: MessageFragment) -> Result<(), AssemblerError> {
        if self.state == AssemblerState::Finalized {
            return Err(AssemblerError::Finalized);
        }
        self.fragments += 1;

        match fragment {
            MessageFragment::TextDelta { content } => self.text.push_str(&content),
            MessageFragment::ReasoningDelta { content } => self.reasoning.push_str(&content),
            MessageFragment::ToolCallArgumentDelta {
                index,
                id,
                name,
                arguments,
            } => self.tool_calls.on_delta(index, id, name, &arguments),
            MessageFragment::UsageDelta { usage } => self.usage = Some(usage),
            MessageFragment::Terminal { finish_reason } => {
                if finish_reason.is_some() {
                    self.finish_reason = finish_reason;
                }
            }
        }
        Ok(())
    }

    pub fn finalize(&mut self) -> Result<AssembledMessage, AssemblerError> {
        if self.state == AssemblerState::Finalized {
            return Err(AssemblerError::Finalized);
        }
        self.state = AssemblerState::Finalized;

        if self.fragments == 0 {
            tracing::warn!("No fragments received before finalization; assembled message is empty");
        } else if self.text.is_empty() && self.tool_calls.is_empty() {
            tracing::warn!(
                "Received {} fragments but neither text nor tool calls. This might indicate \
                 filtered content or a fragment mapping issue",
                self.fragments
            );
        }

        let tool_calls = std::mem::take(&mut self.tool_calls).finalize();
        Ok(AssembledMessage {
            text: non_empty(std::mem::take(&mut self.text)),
            reasoning: non_empty(std::mem::take(&mut self.reasoning)),
            tool_calls,
            usage: self.usage.take(),
            finish_reason: self.finish_reason.take(),
        })
    }
}

fn non_empty(buffer: String) -> Option<String> {
    if buffer.is_empty() {
        None
    } else {
        Some(buffer)
    }
}

/// Drain a fragment stream into one message, stopping at the first terminal fragment.
pub async fn collect_stream<S>(stream: S) -> AssembledMessage
where
    S: Stream<Item = MessageFragment>,
{
    let mut assembler = MessageAssembler::new();
    futures::pin_mut!(stream);
    while let Some(fragment) = stream.next().await {
        let terminal = fragment.is_terminal();
        if let Err(e) = assembler.collect(fragment) {
            tracing::warn!(error = %e, "stopping stream collection");
            break;
        }
        if terminal {
            break;
        }
    }
    assembler.finalize().unwrap_or_default()
}
