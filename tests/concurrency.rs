use gelf_logger::writer_sink::MemorySink;
use gelf_logger::{ContextFields, Logger, Severity};
use serde_json::Value as Json;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

#[test]
fn concurrent_calls_produce_whole_lines() {
    const WORKERS: u64 = 128;

    let sink = Arc::new(MemorySink::new());
    let logger = Logger::new(ContextFields::default(), Severity::Debug, sink.clone());
    let base = logger.with_field("payload", "x".repeat(2048));

    thread::scope(|scope| {
        for worker in 0..WORKERS {
            let entry = base.with_field("worker", worker);
            scope.spawn(move || entry.infof(format_args!("worker {worker} done")));
        }
    });

    let lines = sink.lines();
    assert_eq!(lines.len(), WORKERS as usize);

    let workers: BTreeSet<u64> = lines
        .iter()
        .map(|line| {
            let record: Json =
                serde_json::from_str(line).expect("line is a standalone JSON object");
            assert_eq!(record["_payload"].as_str().map(str::len), Some(2048));
            record["_worker"].as_u64().unwrap()
        })
        .collect();
    assert_eq!(workers, (0..WORKERS).collect::<BTreeSet<_>>());
    assert_eq!(base.fields().len(), 1);
}
