//! Process-wide default logger and the top-level functions that use it.
//!
//! The default logger is built lazily from the process environment and
//! writes to stdout, unless [`crate::init::init_with_config`] or
//! [`set_global`] installed another one first. A lazily built logger gets
//! the same signal exit hook as [`crate::init::init`].

use crate::config::EnvConfig;
use crate::entry::Entry;
use crate::init::LoggerConfig;
use crate::logger::Logger;
use crate::stdout_sink::StdoutSink;
use crate::value::Fields;
use std::fmt;
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Install `logger` as the process-wide logger.
///
/// Fails, handing the logger back, if one is already installed.
pub fn set_global(logger: Logger) -> Result<(), Logger> {
    GLOBAL.set(logger)
}

pub(crate) fn is_initialized() -> bool {
    GLOBAL.get().is_some()
}

/// The process-wide logger.
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(build_default)
}

fn build_default() -> Logger {
    let config = LoggerConfig::from_provider(&EnvConfig::load_bundled());
    let logger = config.build(Arc::new(StdoutSink));

    #[cfg(feature = "exit-hook")]
    if config.exit_hook {
        if let Err(err) = crate::exit_hook::register(logger.clone()) {
            eprintln!("gelf logger: {err}");
        }
    }

    logger
}

pub fn with_fields(fields: Fields) -> Entry {
    global().with_fields(fields)
}

pub fn debug(message: impl fmt::Display) {
    global().debug(message);
}

pub fn info(message: impl fmt::Display) {
    global().info(message);
}

pub fn warn(message: impl fmt::Display) {
    global().warn(message);
}

pub fn error(message: impl fmt::Display) {
    global().error(message);
}

pub fn fatal(message: impl fmt::Display) -> ! {
    global().fatal(message)
}

pub fn panic(message: impl fmt::Display) -> ! {
    global().panic(message)
}

pub fn debugf(args: fmt::Arguments<'_>) {
    global().debugf(args);
}

pub fn infof(args: fmt::Arguments<'_>) {
    global().infof(args);
}

pub fn warnf(args: fmt::Arguments<'_>) {
    global().warnf(args);
}

pub fn errorf(args: fmt::Arguments<'_>) {
    global().errorf(args);
}

pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    global().fatalf(args)
}

pub fn panicf(args: fmt::Arguments<'_>) -> ! {
    global().panicf(args)
}
