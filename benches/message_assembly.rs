//! Benchmarks for streamed message assembly and tool dispatch
//!
//! This benchmark measures:
//! - Fragment collection throughput
//! - Tool call accumulation across interleaved indices
//! - Dispatch of assembled calls

use ai_lib_tools::pipeline::{collect_stream, MessageAssembler};
use ai_lib_tools::tool::{CallArgs, Dispatcher, ToolFn, ToolRegistry};
use ai_lib_tools::types::MessageFragment;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

/// A text-only turn split into word-sized fragments
fn text_fragments(words: usize) -> Vec<MessageFragment> {
    let mut fragments: Vec<_> = (0..words)
        .map(|i| MessageFragment::text(format!("word{i} ")))
        .collect();
    fragments.push(MessageFragment::terminal(Some("stop")));
    fragments
}

/// Several tool calls whose argument chunks arrive interleaved
fn tool_call_fragments(calls: u32) -> Vec<MessageFragment> {
    let mut fragments = Vec::new();
    for index in 0..calls {
        fragments.push(MessageFragment::tool_call_start(
            index,
            format!("call_{index}"),
            "add",
        ));
    }
    for chunk in ["{\"a\"", ": 1, ", "\"b\": ", "2}"] {
        for index in 0..calls {
            fragments.push(MessageFragment::arguments(index, chunk));
        }
    }
    fragments.push(MessageFragment::terminal(Some("tool_calls")));
    fragments
}

fn bench_text_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_assembly");

    let fragments = text_fragments(512);
    group.throughput(Throughput::Elements(fragments.len() as u64));

    group.bench_function("collect_512_fragments", |b| {
        b.iter(|| {
            let mut asm = MessageAssembler::new();
            for fragment in black_box(&fragments).iter().cloned() {
                asm.collect(fragment).unwrap();
            }
            asm.finalize().unwrap()
        })
    });

    group.finish();
}

fn bench_tool_call_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("tool_call_assembly");

    let fragments = tool_call_fragments(8);
    group.throughput(Throughput::Elements(fragments.len() as u64));

    group.bench_function("interleaved_8_calls", |b| {
        b.iter(|| {
            let mut asm = MessageAssembler::new();
            for fragment in black_box(&fragments).iter().cloned() {
                asm.collect(fragment).unwrap();
            }
            asm.finalize().unwrap()
        })
    });

    let runtime = tokio::runtime::Runtime::new().unwrap();
    group.bench_function("collect_stream_8_calls", |b| {
        b.to_async(&runtime).iter(|| async {
            collect_stream(futures::stream::iter(black_box(&fragments).iter().cloned())).await
        })
    });

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    let add = ToolFn::builder("add")
        .doc("Add two integers.")
        .param::<i64>("a")
        .param::<i64>("b")
        .sync(|args: CallArgs| Ok(args.get::<i64>("a")? + args.get::<i64>("b")?));
    let dispatcher = Dispatcher::new(ToolRegistry::build(vec![add]).unwrap().into_shared());

    let mut asm = MessageAssembler::new();
    for fragment in tool_call_fragments(8) {
        asm.collect(fragment).unwrap();
    }
    let requests: Vec<_> = asm
        .finalize()
        .unwrap()
        .tool_calls
        .iter()
        .map(|call| call.to_request())
        .collect();
    group.throughput(Throughput::Elements(requests.len() as u64));

    group.bench_function("call_blocking_8", |b| {
        b.iter(|| {
            for request in black_box(&requests) {
                dispatcher.call_blocking(request).unwrap();
            }
        })
    });

    let runtime = tokio::runtime::Runtime::new().unwrap();
    group.bench_function("call_all_8", |b| {
        b.to_async(&runtime)
            .iter(|| async { dispatcher.call_all(black_box(&requests)).await })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_text_assembly,
    bench_tool_call_assembly,
    bench_dispatch,
);
criterion_main!(benches);
