use crate::config::ConfigProvider;
use crate::context::ContextFields;
use crate::entry::{Entry, LogError};
use crate::gelf::{FormatError, GelfFormatter};
use crate::init::LoggerConfig;
use crate::record::LogRecord;
use crate::severity::Severity;
use crate::sink::LogSink;
use crate::value::{Fields, Value};
use std::fmt;
use std::sync::Arc;

struct Inner {
    context: ContextFields,
    threshold: Severity,
    formatter: GelfFormatter,
    sink: Arc<dyn LogSink>,
}

/// Structured GELF logger.
///
/// Cloning is cheap and every clone writes to the same sink with the same
/// context. Each level method starts from an empty set of custom fields;
/// use [`Logger::with_fields`] to get an [`Entry`] that carries some.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

impl Logger {
    /// Build a logger that writes records at or above `threshold` to `sink`.
    pub fn new(context: ContextFields, threshold: Severity, sink: Arc<dyn LogSink>) -> Self {
        Logger {
            inner: Arc::new(Inner {
                context,
                threshold,
                formatter: GelfFormatter::new(),
                sink,
            }),
        }
    }

    /// Build a logger from `LOG_LEVEL`, `ENVIRONMENT` and `VERSION`.
    pub fn from_provider(provider: &dyn ConfigProvider, sink: Arc<dyn LogSink>) -> Self {
        LoggerConfig::from_provider(provider).build(sink)
    }

    pub fn context(&self) -> &ContextFields {
        &self.inner.context
    }

    pub fn threshold(&self) -> Severity {
        self.inner.threshold
    }

    pub fn is_enabled(&self, severity: Severity) -> bool {
        severity >= self.inner.threshold
    }

    /// Entry with no custom fields.
    pub fn entry(&self) -> Entry {
        Entry::new(self.clone(), Fields::new())
    }

    /// Entry pre-populated with `fields`, reusable for any number of calls.
    pub fn with_fields(&self, fields: Fields) -> Entry {
        Entry::new(self.clone(), fields)
    }

    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> Entry {
        self.entry().with_field(key, value)
    }

    pub(crate) fn dispatch(&self, record: &LogRecord<'_>) -> Result<(), LogError> {
        let line = self.inner.formatter.format(record, &self.inner.context)?;
        self.inner.sink.write_line(&line)?;
        Ok(())
    }

    pub(crate) fn dispatch_minimal(&self, record: &LogRecord<'_>, cause: &FormatError) {
        let line = match self.inner.formatter.format_minimal(
            record.message,
            record.severity,
            record.timestamp_millis(),
        ) {
            Ok(line) => line,
            Err(err) => {
                eprintln!("dropping {} log record ({cause}): {err}", record.severity);
                return;
            }
        };
        if let Err(err) = self.inner.sink.write_line(&line) {
            eprintln!("dropping {} log record: {err}", record.severity);
        }
    }

    /// Flush the sink, reporting failures on stderr.
    pub fn flush(&self) {
        if let Err(err) = self.inner.sink.flush() {
            eprintln!("failed to flush log sink: {err}");
        }
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.entry().debug(message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.entry().info(message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.entry().warn(message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.entry().error(message);
    }

    pub fn fatal(&self, message: impl fmt::Display) -> ! {
        self.entry().fatal(message)
    }

    pub fn panic(&self, message: impl fmt::Display) -> ! {
        self.entry().panic(message)
    }

    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.entry().debugf(args);
    }

    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.entry().infof(args);
    }

    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.entry().warnf(args);
    }

    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.entry().errorf(args);
    }

    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.entry().fatalf(args)
    }

    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.entry().panicf(args)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("context", &self.inner.context)
            .field("threshold", &self.inner.threshold)
            .finish_non_exhaustive()
    }
}
