//! Structured logging to GELF 1.1 JSON lines.
//!
//! Every record carries the deployment environment and application version
//! read once at startup, plus any custom fields attached at the call site.
//!
//! ```no_run
//! use gelf_logger::fields;
//!
//! gelf_logger::init().expect("logger already initialized");
//! gelf_logger::info("service started");
//!
//! let request = gelf_logger::with_fields(fields! { "request_id" => "r-42" });
//! request.warnf(format_args!("slow upstream: {} ms", 830));
//! ```

pub mod config;
pub mod context;
pub mod entry;
pub mod gelf;
pub mod global;
pub mod init;
pub mod logger;
pub mod macros;
pub mod noop_sink;
pub mod record;
pub mod severity;
pub mod sink;
pub mod stdout_sink;
pub mod value;
pub mod writer_sink;

#[cfg(feature = "exit-hook")]
pub mod exit_hook;

#[cfg(feature = "tracing-layer")]
pub mod layer;

pub use config::{ConfigProvider, EnvConfig};
pub use context::ContextFields;
pub use entry::{merge_fields, Entry, LogError};
pub use gelf::{FormatError, GelfFormatter};
pub use global::{
    debug, debugf, error, errorf, fatal, fatalf, global, info, infof, panic, panicf, set_global,
    warn, warnf, with_fields,
};
pub use init::{init, init_with_config, InitError, LoggerConfig};
pub use logger::Logger;
pub use severity::Severity;
pub use sink::LogSink;
pub use value::{Fields, Value};
