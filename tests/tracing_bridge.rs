#![cfg(feature = "tracing-layer")]

use gelf_logger::writer_sink::MemorySink;
use gelf_logger::{ContextFields, LoggerConfig, Severity};
use serde_json::Value as Json;
use std::sync::Arc;

// Only test in this binary: it installs global logger and subscriber.
#[test]
fn init_with_bridge_routes_tracing_events() {
    let sink = Arc::new(MemorySink::new());
    let config = LoggerConfig {
        level: Severity::Info,
        context: ContextFields::new("bridge", "1.0.0"),
        #[cfg(feature = "exit-hook")]
        exit_hook: false,
        tracing_bridge: true,
    };
    let logger = gelf_logger::init_with_config(config, sink.clone()).unwrap();

    tracing::debug!("hidden");
    tracing::info!(order_id = 17u64, "order accepted");
    logger.warn("direct call");

    let out: Vec<Json> = sink
        .lines()
        .iter()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(out.len(), 2);
    assert_eq!(out[0]["short_message"], "order accepted");
    assert_eq!(out[0]["_order_id"], 17);
    assert_eq!(out[0]["_environment"], "bridge");
    assert_eq!(out[1]["short_message"], "direct call");
}
