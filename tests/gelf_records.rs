use gelf_logger::writer_sink::MemorySink;
use gelf_logger::{fields, ContextFields, EnvConfig, Logger, Severity};
use serde_json::{Map, Value as Json};
use std::collections::BTreeMap;
use std::sync::Arc;

const SCHEMA_KEYS: [&str; 5] = ["version", "short_message", "full_message", "timestamp", "level"];

fn default_logger() -> (Logger, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let config = EnvConfig::load_with(BTreeMap::new(), |_| None);
    (Logger::from_provider(&config, sink.clone()), sink)
}

fn records(sink: &MemorySink) -> Vec<Map<String, Json>> {
    sink.lines()
        .iter()
        .map(|line| match serde_json::from_str(line).unwrap() {
            Json::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        })
        .collect()
}

#[test]
fn info_with_default_configuration() {
    let (logger, sink) = default_logger();
    logger.info("Lorem Ipsum");

    let out = records(&sink);
    assert_eq!(out[0]["short_message"], "Lorem Ipsum");
    assert_eq!(out[0]["_environment"], "dev");
    assert_eq!(out[0]["_app_version"], "detached");
    assert_eq!(out[0]["full_message"], "");
    assert_eq!(out[0]["version"], "1.1");
    assert!(out[0]["timestamp"].is_i64());
}

#[test]
fn with_fields_and_formatted_message() {
    let (logger, sink) = default_logger();
    logger
        .with_fields(fields! { "custom" => "field" })
        .infof(format_args!("Lorem {}", "Ipsum"));

    let out = records(&sink);
    assert_eq!(out[0]["short_message"], "Lorem Ipsum");
    assert_eq!(out[0]["_custom"], "field");
    assert!(!out[0].contains_key("custom"));
}

#[test]
fn macro_on_entry() {
    let (logger, sink) = default_logger();
    let entry = logger.with_field("request_id", "r-7");
    gelf_logger::warnf!(on entry, "retrying in {} ms", 250);
    gelf_logger::debugf!(on logger, "plain {}", 1);

    let out = records(&sink);
    assert_eq!(out[0]["short_message"], "retrying in 250 ms");
    assert_eq!(out[0]["_request_id"], "r-7");
    assert_eq!(out[0]["level"], 4);
    assert_eq!(out[1]["short_message"], "plain 1");
    assert!(!out[1].contains_key("_request_id"));
}

#[test]
fn records_differ_only_in_timestamp() {
    let (logger, sink) = default_logger();
    let entry = logger.with_fields(fields! { "a" => 1, "b" => true, "c" => "x" });
    entry.error("same");
    entry.error("same");

    let mut out = records(&sink);
    for record in &mut out {
        record.remove("timestamp");
    }
    assert_eq!(out[0], out[1]);
}

#[test]
fn every_record_has_the_schema_keys() {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::new(ContextFields::new("prod", "3.1.0"), Severity::Debug, sink.clone());
    let entry = logger.with_fields(fields! { "version" => "mine", "full_message" => "details" });
    entry.debug("a");
    entry.info("b");
    entry.warn("c");
    entry.error("d");

    for record in records(&sink) {
        for key in SCHEMA_KEYS {
            assert!(record.contains_key(key), "missing {key}");
        }
        assert_eq!(record["version"], "1.1");
        assert_eq!(record["full_message"], "details");
        assert_eq!(record["_app_version"], "3.1.0");
        assert!(record
            .keys()
            .filter(|k| !SCHEMA_KEYS.contains(&k.as_str()))
            .all(|k| k.starts_with('_')));
    }
}
