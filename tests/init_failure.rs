#![cfg(feature = "tracing-layer")]

use gelf_logger::writer_sink::MemorySink;
use gelf_logger::{ContextFields, InitError, LoggerConfig, Severity};
use serde_json::Value as Json;
use std::sync::Arc;

fn config(tracing_bridge: bool) -> LoggerConfig {
    LoggerConfig {
        level: Severity::Debug,
        context: ContextFields::new("init", "0.3.0"),
        #[cfg(feature = "exit-hook")]
        exit_hook: false,
        tracing_bridge,
    }
}

// Only test in this binary: it installs global logger and subscriber.
#[test]
fn failed_bridge_leaves_no_global_logger_behind() {
    tracing::subscriber::set_global_default(tracing_subscriber::registry()).unwrap();

    let rejected = Arc::new(MemorySink::new());
    let result = gelf_logger::init_with_config(config(true), rejected.clone());
    assert!(matches!(result, Err(InitError::Tracing(_))));

    let accepted = Arc::new(MemorySink::new());
    gelf_logger::init_with_config(config(false), accepted.clone()).unwrap();
    gelf_logger::info("after retry");

    assert!(rejected.lines().is_empty());
    let lines = accepted.lines();
    assert_eq!(lines.len(), 1);
    let record: Json = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(record["short_message"], "after retry");
    assert_eq!(record["_environment"], "init");

    assert!(matches!(
        gelf_logger::init_with_config(config(false), accepted),
        Err(InitError::AlreadyInitialized)
    ));
}
