use crate::severity::Severity;
use crate::value::Fields;
use chrono::{DateTime, Utc};

/// One log call, stamped at dispatch time and discarded once written.
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub message: &'a str,
    pub fields: &'a Fields,
}

impl<'a> LogRecord<'a> {
    /// Record stamped with the current time.
    pub fn now(severity: Severity, message: &'a str, fields: &'a Fields) -> Self {
        LogRecord {
            timestamp: Utc::now(),
            severity,
            message,
            fields,
        }
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}
