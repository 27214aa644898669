use crate::init::InitError;
use crate::logger::Logger;
use crate::severity::Severity;
use crate::value::{Fields, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Registry;

/// `tracing_subscriber` layer that writes events as GELF records through a
/// [`Logger`].
///
/// Event fields become custom fields, the `message` field becomes the short
/// message, and the event's target, file and line are attached as
/// `target`, `file` and `line` unless the event already set those keys.
/// Events below the logger threshold are ignored. Writing happens on the
/// calling thread.
#[derive(Clone, Debug)]
pub struct GelfLayer {
    logger: Logger,
}

impl GelfLayer {
    pub fn new(logger: Logger) -> Self {
        GelfLayer { logger }
    }
}

impl<S> Layer<S> for GelfLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let severity = Severity::from(*meta.level());
        if !self.logger.is_enabled(severity) {
            return;
        }

        let mut fields = Fields::new();
        let mut message: Option<String> = None;

        let mut visitor = FieldVisitor {
            fields: &mut fields,
            message: &mut message,
        };
        event.record(&mut visitor);

        fields
            .entry("target".to_string())
            .or_insert_with(|| Value::from(meta.target()));
        if let Some(file) = meta.file() {
            fields
                .entry("file".to_string())
                .or_insert_with(|| Value::from(file));
        }
        if let Some(line) = meta.line() {
            fields
                .entry("line".to_string())
                .or_insert_with(|| Value::from(line));
        }

        self.logger
            .with_fields(fields)
            .log(severity, message.unwrap_or_default());
    }
}

/// Install a [`Registry`] combined with a [`GelfLayer`] as the global
/// default subscriber, so all `tracing` events in the process are written
/// by `logger`.
pub fn init_tracing(logger: Logger) -> Result<(), InitError> {
    let subscriber = Registry::default().with(GelfLayer::new(logger));
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

struct FieldVisitor<'a> {
    fields: &'a mut Fields,
    message: &'a mut Option<String>,
}

impl FieldVisitor<'_> {
    fn insert(&mut self, field: &Field, value: Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            *self.message = Some(value.to_string());
        } else {
            self.insert(field, Value::from(value));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, Value::from_error(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        // `message` arrives here as pre-formatted arguments.
        if field.name() == "message" {
            *self.message = Some(format!("{:?}", value));
        } else {
            self.insert(field, Value::String(format!("{:?}", value)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextFields;
    use crate::writer_sink::MemorySink;
    use serde_json::Value as Json;
    use std::sync::Arc;

    fn capture(threshold: Severity, f: impl FnOnce()) -> Vec<Json> {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::new(ContextFields::new("test", "0.1.1"), threshold, sink.clone());
        let subscriber = Registry::default().with(GelfLayer::new(logger));
        tracing::subscriber::with_default(subscriber, f);
        sink.lines()
            .iter()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn events_become_gelf_records() {
        let out = capture(Severity::Debug, || {
            tracing::info!(custom = "field", attempt = 2u64, ok = true, "Lorem {}", "Ipsum");
        });

        assert_eq!(out.len(), 1);
        let record = &out[0];
        assert_eq!(record["short_message"], "Lorem Ipsum");
        assert_eq!(record["level"], 6);
        assert_eq!(record["_custom"], "field");
        assert_eq!(record["_attempt"], 2);
        assert_eq!(record["_ok"], true);
        assert_eq!(record["_environment"], "test");
        assert_eq!(record["_app_version"], "0.1.1");
        assert!(record["_target"].as_str().unwrap().starts_with("gelf_logger"));
        assert!(record.get("_line").is_some());
    }

    #[test]
    fn errors_are_recorded_as_strings() {
        let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "upstream timed out");
        let out = capture(Severity::Debug, || {
            tracing::error!(error = &err as &(dyn std::error::Error + 'static), "request failed");
        });
        assert_eq!(out[0]["_error"], "upstream timed out");
        assert_eq!(out[0]["level"], 3);
    }

    #[test]
    fn threshold_applies_to_events() {
        let out = capture(Severity::Warn, || {
            tracing::trace!("hidden");
            tracing::debug!("hidden");
            tracing::info!("hidden");
            tracing::warn!("shown");
        });
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["short_message"], "shown");
        assert_eq!(out[0]["level"], 4);
    }

    #[test]
    fn event_fields_win_over_metadata() {
        let out = capture(Severity::Debug, || {
            tracing::info!(file = "explicit.rs", "with file field");
        });
        assert_eq!(out[0]["_file"], "explicit.rs");
    }
}
