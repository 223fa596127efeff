//! Tests for folding streamed fragments into assistant turns

use ai_lib_tools::pipeline::{collect_stream, AssemblerError, AssemblerState, MessageAssembler};
use ai_lib_tools::tool::{CallArgs, Dispatcher, ToolFn, ToolRegistry};
use ai_lib_tools::types::{ChatMessage, MessageFragment};
use serde_json::{json, Value};

fn delta(index: u32, id: Option<&str>, name: Option<&str>, chunk: &str) -> MessageFragment {
    MessageFragment::ToolCallArgumentDelta {
        index,
        id: id.map(str::to_string),
        name: name.map(str::to_string),
        arguments: chunk.to_string(),
    }
}

#[test]
fn test_tool_call_chunks_concatenate() {
    let mut asm = MessageAssembler::new();
    asm.collect(delta(0, Some("c1"), Some("f"), "{\"x\":")).unwrap();
    asm.collect(delta(0, None, None, "1}")).unwrap();
    let msg = asm.finalize().unwrap();

    assert_eq!(msg.tool_calls.len(), 1);
    let call = &msg.tool_calls[0];
    assert_eq!(call.id.as_deref(), Some("c1"));
    assert_eq!(call.name.as_deref(), Some("f"));
    assert_eq!(call.arguments, "{\"x\":1}");
    assert_eq!(call.parsed_arguments(), json!({"x": 1}));
}

#[test]
fn test_interleaved_text_and_tool_calls() {
    let mut asm = MessageAssembler::new();
    for fragment in [
        MessageFragment::text("Hello"),
        delta(0, None, None, "a"),
        MessageFragment::text(" World"),
        delta(0, None, None, "b"),
    ] {
        asm.collect(fragment).unwrap();
    }
    let msg = asm.finalize().unwrap();

    assert_eq!(msg.text.as_deref(), Some("Hello World"));
    assert_eq!(msg.tool_calls.len(), 1);
    assert_eq!(msg.tool_calls[0].arguments, "ab");
}

#[test]
fn test_identity_is_never_overwritten() {
    let mut asm = MessageAssembler::new();
    asm.collect(delta(1, Some("c2"), Some("second"), "")).unwrap();
    asm.collect(delta(0, Some("c1"), Some("first"), "{}")).unwrap();
    asm.collect(delta(1, Some("other"), Some("renamed"), "{}")).unwrap();
    let msg = asm.finalize().unwrap();

    // First-seen order, not index order.
    let ids: Vec<_> = msg.tool_calls.iter().map(|c| c.id.as_deref()).collect();
    assert_eq!(ids, vec![Some("c2"), Some("c1")]);
    assert_eq!(msg.tool_calls[0].name.as_deref(), Some("second"));
}

#[test]
fn test_usage_and_reasoning() {
    let mut asm = MessageAssembler::new();
    asm.collect(MessageFragment::reasoning("think ")).unwrap();
    asm.collect(MessageFragment::usage(json!({"prompt_tokens": 4}))).unwrap();
    asm.collect(MessageFragment::reasoning("harder")).unwrap();
    asm.collect(MessageFragment::usage(json!({"prompt_tokens": 4, "completion_tokens": 9})))
        .unwrap();
    asm.collect(MessageFragment::terminal(Some("stop"))).unwrap();
    let msg = asm.finalize().unwrap();

    assert_eq!(msg.reasoning.as_deref(), Some("think harder"));
    assert_eq!(msg.usage, Some(json!({"prompt_tokens": 4, "completion_tokens": 9})));
    assert_eq!(msg.finish_reason.as_deref(), Some("stop"));
    assert!(msg.text.is_none());
}

#[test]
fn test_use_after_finalize_is_rejected() {
    let mut asm = MessageAssembler::new();
    asm.collect(MessageFragment::text("done")).unwrap();
    asm.finalize().unwrap();

    assert_eq!(asm.state(), AssemblerState::Finalized);
    assert_eq!(
        asm.collect(MessageFragment::text("late")),
        Err(AssemblerError::Finalized)
    );
    assert_eq!(asm.finalize(), Err(AssemblerError::Finalized));
}

#[test]
fn test_incomplete_arguments_finalize_gracefully() {
    let mut asm = MessageAssembler::new();
    asm.collect(delta(0, Some("c1"), Some("f"), "{\"x\": [1, 2")).unwrap();
    let msg = asm.finalize().unwrap();

    assert_eq!(msg.tool_calls[0].arguments, "{\"x\": [1, 2");
    assert_eq!(msg.tool_calls[0].parsed_arguments(), json!("{\"x\": [1, 2"));
}

#[tokio::test]
async fn test_collect_from_token_stream() {
    let frames = tokio_stream::iter(vec![
        MessageFragment::text("Checking"),
        MessageFragment::tool_call_start(0, "call_a", "lookup"),
        MessageFragment::tool_call_start(1, "call_b", "lookup"),
        MessageFragment::arguments(1, "{\"q\": \"b\"}"),
        MessageFragment::arguments(0, "{\"q\": \"a\"}"),
        MessageFragment::terminal(Some("tool_calls")),
    ]);
    let msg = collect_stream(frames).await;

    assert_eq!(msg.text.as_deref(), Some("Checking"));
    assert_eq!(msg.tool_calls[0].parsed_arguments(), json!({"q": "a"}));
    assert_eq!(msg.tool_calls[1].parsed_arguments(), json!({"q": "b"}));

    let message = msg.into_message();
    let wire = serde_json::to_value(&message).unwrap();
    assert_eq!(wire["role"], "assistant");
    assert_eq!(wire["tool_calls"][1]["id"], "call_b");
    assert_eq!(wire["tool_calls"][1]["type"], "function");
    assert_eq!(wire["tool_calls"][1]["function"]["name"], "lookup");
}

#[tokio::test]
async fn test_assemble_then_dispatch() {
    let lookup = ToolFn::builder("lookup")
        .doc("Look up a term.")
        .param::<String>("q")
        .sync(|args: CallArgs| Ok(format!("result for {}", args.get::<String>("q")?)));
    let dispatcher = Dispatcher::new(ToolRegistry::build(vec![lookup]).unwrap().into_shared());

    let frames = tokio_stream::iter(vec![
        MessageFragment::tool_call_start(0, "call_a", "lookup"),
        MessageFragment::arguments(0, "{\"q\":"),
        MessageFragment::arguments(0, " \"rust\"}"),
        MessageFragment::terminal(None),
    ]);
    let msg = collect_stream(frames).await;
    assert!(msg.has_tool_calls());

    let requests: Vec<_> = msg.tool_calls.iter().map(|c| c.to_request()).collect();
    let mut conversation = vec![ChatMessage::user("what is rust?"), msg.into_message()];
    for result in dispatcher.call_all(&requests).await {
        conversation.push(result.into_message());
    }

    let wire: Vec<Value> = conversation
        .iter()
        .map(|m| serde_json::to_value(m).unwrap())
        .collect();
    assert_eq!(
        wire[2],
        json!({"role": "tool", "tool_call_id": "call_a", "content": "result for rust"})
    );
    assert_eq!(wire[1]["content"], Value::Null);
}

#[tokio::test]
async fn test_streamed_call_without_arguments_dispatches() {
    let ping = ToolFn::builder("ping")
        .doc("Ping.")
        .sync(|_args: CallArgs| Ok("pong"));
    let dispatcher = Dispatcher::new(ToolRegistry::build(vec![ping]).unwrap().into_shared());

    let msg = collect_stream(tokio_stream::iter(vec![
        MessageFragment::tool_call_start(0, "call_p", "ping"),
        MessageFragment::terminal(Some("tool_calls")),
    ]))
    .await;

    let result = dispatcher.call_handled(&msg.tool_calls[0].to_request()).await;
    assert_eq!(result.content, "pong");
}
