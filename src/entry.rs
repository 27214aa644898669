use crate::gelf::FormatError;
use crate::logger::Logger;
use crate::record::LogRecord;
use crate::severity::Severity;
use crate::value::{Fields, Value};
use std::fmt;
use std::io;
use std::sync::Arc;

/// Error returned by [`Entry::try_log`].
#[derive(thiserror::Error, Debug)]
pub enum LogError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("failed to write log record: {0}")]
    Io(#[from] io::Error),
}

/// Overlay `extra` on top of `base`; keys in `extra` win.
///
/// Neither input is modified.
pub fn merge_fields(base: Option<&Fields>, extra: Fields) -> Fields {
    let mut merged = base.cloned().unwrap_or_default();
    merged.extend(extra);
    merged
}

/// A set of custom fields bound to a [`Logger`].
///
/// Entries are immutable. Deriving one with more fields returns a new
/// entry and leaves the original untouched, so a base entry carrying e.g.
/// a request id can be shared between threads and extended freely.
#[derive(Clone)]
pub struct Entry {
    logger: Logger,
    fields: Arc<Fields>,
}

impl Entry {
    pub(crate) fn new(logger: Logger, fields: Fields) -> Self {
        Entry {
            logger,
            fields: Arc::new(fields),
        }
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// New entry carrying this entry's fields overlaid with `extra`.
    pub fn with_fields(&self, extra: Fields) -> Entry {
        Entry::new(self.logger.clone(), merge_fields(Some(&self.fields), extra))
    }

    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> Entry {
        let mut extra = Fields::new();
        extra.insert(key.into(), value.into());
        self.with_fields(extra)
    }

    /// Format and write one record, reporting any failure to the caller.
    ///
    /// Records below the logger threshold are skipped and return `Ok(())`.
    pub fn try_log(&self, severity: Severity, message: impl fmt::Display) -> Result<(), LogError> {
        if !self.logger.is_enabled(severity) {
            return Ok(());
        }
        let message = message.to_string();
        self.logger
            .dispatch(&LogRecord::now(severity, &message, &self.fields))
    }

    /// Format and write one record.
    ///
    /// A record that cannot be encoded is replaced by a minimal one holding
    /// only the message and level. Write failures are reported on stderr and
    /// the record is dropped.
    pub fn log(&self, severity: Severity, message: impl fmt::Display) {
        if !self.logger.is_enabled(severity) {
            return;
        }
        let message = message.to_string();
        let record = LogRecord::now(severity, &message, &self.fields);
        match self.logger.dispatch(&record) {
            Ok(()) => {}
            Err(LogError::Format(err)) => self.logger.dispatch_minimal(&record, &err),
            Err(LogError::Io(err)) => {
                eprintln!("dropping {severity} log record: {err}");
            }
        }
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Severity::Debug, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Severity::Info, message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.log(Severity::Warn, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Severity::Error, message);
    }

    /// Write a fatal record, then exit the process with status 1.
    ///
    /// The process exits even if the record could not be written.
    pub fn fatal(&self, message: impl fmt::Display) -> ! {
        self.log(Severity::Fatal, message);
        self.logger.flush();
        std::process::exit(1)
    }

    /// Write a panic record, then panic with the same message.
    ///
    /// The panic unwinds like any other and may be caught further up.
    pub fn panic(&self, message: impl fmt::Display) -> ! {
        let message = message.to_string();
        self.log(Severity::Panic, &message);
        self.logger.flush();
        panic!("{message}")
    }

    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.debug(args);
    }

    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.info(args);
    }

    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.warn(args);
    }

    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.error(args);
    }

    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.fatal(args)
    }

    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.panic(args)
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry").field("fields", &self.fields).finish()
    }
}
