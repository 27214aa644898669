//! GELF 1.1 encoding.
//!
//! A record becomes one JSON object terminated by `\n`. The schema keys
//! (`version`, `short_message`, `full_message`, `timestamp`, `level`) come
//! first, followed by every custom field prefixed with `_` in key order.
//! Context fields are merged after call-site fields and therefore win.

use crate::context::{ContextFields, APP_VERSION_KEY, ENVIRONMENT_KEY};
use crate::record::LogRecord;
use crate::severity::Severity;
use crate::value::Value;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Value of the schema `version` field.
pub const GELF_VERSION: &str = "1.1";

pub const FULL_MESSAGE_KEY: &str = "full_message";
pub const LEVEL_KEY: &str = "level";
pub const TIMESTAMP_KEY: &str = "timestamp";
pub const VERSION_KEY: &str = "version";

static EMPTY_MESSAGE: Value = Value::String(String::new());

/// Error returned when a record cannot be encoded.
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    #[error("failed to marshal fields to JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct GelfRecord<'a> {
    version: &'static str,
    short_message: &'a str,
    full_message: &'a Value,
    timestamp: i64,
    level: u8,
    #[serde(flatten)]
    additional: BTreeMap<String, Cow<'a, Value>>,
}

/// Turns [`LogRecord`]s into GELF JSON lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct GelfFormatter;

impl GelfFormatter {
    pub fn new() -> Self {
        GelfFormatter
    }

    /// Encode `record` with `context` merged in.
    ///
    /// Call-site `level`, `timestamp` and `version` fields are dropped in
    /// favour of the values stamped here. A call-site `full_message` is kept
    /// as the full message; when absent it is written as an empty string.
    pub fn format(
        &self,
        record: &LogRecord<'_>,
        context: &ContextFields,
    ) -> Result<Vec<u8>, FormatError> {
        let mut full_message = &EMPTY_MESSAGE;
        let mut additional = BTreeMap::new();

        for (key, value) in record.fields {
            match key.as_str() {
                FULL_MESSAGE_KEY => full_message = value,
                LEVEL_KEY | TIMESTAMP_KEY | VERSION_KEY => {}
                _ => {
                    additional.insert(format!("_{key}"), Cow::Borrowed(value));
                }
            }
        }

        additional.insert(
            format!("_{ENVIRONMENT_KEY}"),
            Cow::Owned(Value::from(context.environment())),
        );
        additional.insert(
            format!("_{APP_VERSION_KEY}"),
            Cow::Owned(Value::from(context.version())),
        );

        encode(&GelfRecord {
            version: GELF_VERSION,
            short_message: record.message,
            full_message,
            timestamp: record.timestamp_millis(),
            level: record.severity.syslog_code(),
            additional,
        })
    }

    /// Fallback record carrying only the schema fields, used when the full
    /// record cannot be encoded.
    pub fn format_minimal(
        &self,
        message: &str,
        severity: Severity,
        timestamp_millis: i64,
    ) -> Result<Vec<u8>, FormatError> {
        encode(&GelfRecord {
            version: GELF_VERSION,
            short_message: message,
            full_message: &EMPTY_MESSAGE,
            timestamp: timestamp_millis,
            level: severity.syslog_code(),
            additional: BTreeMap::new(),
        })
    }
}

fn encode<T: Serialize>(record: &T) -> Result<Vec<u8>, FormatError> {
    let mut line = serde_json::to_vec(record)?;
    line.push(b'\n');
    Ok(line)
}
