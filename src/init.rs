use crate::config::{ConfigProvider, EnvConfig, LOG_LEVEL_ENV};
use crate::context::ContextFields;
use crate::global;
use crate::logger::Logger;
use crate::severity::Severity;
use crate::sink::LogSink;
use crate::stdout_sink::StdoutSink;
use std::sync::Arc;

/// Logger configuration.
///
/// **Fields**
/// - `level`: minimum severity written; lower records are skipped.
/// - `context`: environment and version stamped on every record.
/// - `exit_hook`: if `true`, [`init_with_config`] registers the signal
///   hook that logs once before the process is terminated.
/// - `tracing_bridge`: if `true`, [`init_with_config`] also installs a
///   [`GelfLayer`](crate::layer::GelfLayer) as the global `tracing`
///   subscriber so `tracing::info!` and friends end up in the same sink.
#[derive(Clone, Debug)]
pub struct LoggerConfig {
    pub level: Severity,
    pub context: ContextFields,
    #[cfg(feature = "exit-hook")]
    pub exit_hook: bool,
    #[cfg(feature = "tracing-layer")]
    pub tracing_bridge: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Severity::Debug,
            context: ContextFields::default(),
            #[cfg(feature = "exit-hook")]
            exit_hook: true,
            #[cfg(feature = "tracing-layer")]
            tracing_bridge: false,
        }
    }
}

impl LoggerConfig {
    /// Resolve level and context from `LOG_LEVEL`, `ENVIRONMENT` and
    /// `VERSION`. An unrecognised level falls back to debug.
    pub fn from_provider(provider: &dyn ConfigProvider) -> Self {
        Self {
            level: Severity::from_level_name(&provider.get(LOG_LEVEL_ENV)),
            context: ContextFields::from_provider(provider),
            ..Self::default()
        }
    }

    /// Build a standalone logger writing to `sink`. Nothing global is
    /// touched.
    pub fn build(&self, sink: Arc<dyn LogSink>) -> Logger {
        Logger::new(self.context.clone(), self.level, sink)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error("the global logger is already initialized")]
    AlreadyInitialized,

    #[cfg(feature = "exit-hook")]
    #[error(transparent)]
    ExitHook(#[from] crate::exit_hook::ExitHookError),

    #[cfg(feature = "tracing-layer")]
    #[error("a global tracing subscriber is already installed: {0}")]
    Tracing(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the process-wide logger using the provided sink and
/// [`LoggerConfig`].
///
/// **Returns**
/// - The installed logger, which the top-level functions
///   ([`crate::info`], [`crate::with_fields`], ...) write through.
/// - `Err(InitError::AlreadyInitialized)` if a global logger exists,
///   including one created lazily by an earlier top-level call.
/// - `Err(InitError::Tracing)` if the tracing bridge was requested and
///   another `tracing` subscriber is already installed. The global logger
///   is left untouched, so a later call may retry.
/// - `Err(InitError::ExitHook)` if the signal handlers cannot be
///   installed. The logger is already global at that point and stays so.
pub fn init_with_config(
    config: LoggerConfig,
    sink: Arc<dyn LogSink>,
) -> Result<&'static Logger, InitError> {
    if global::is_initialized() {
        return Err(InitError::AlreadyInitialized);
    }
    let logger = config.build(sink);

    #[cfg(feature = "tracing-layer")]
    if config.tracing_bridge {
        crate::layer::init_tracing(logger.clone())?;
    }

    global::set_global(logger.clone()).map_err(|_| InitError::AlreadyInitialized)?;

    #[cfg(feature = "exit-hook")]
    if config.exit_hook {
        crate::exit_hook::register(logger)?;
    }

    Ok(global::global())
}

/// Initialize from the process environment, writing to stdout.
///
/// Equivalent to calling [`init_with_config`] with the bundled
/// configuration resolved from `ENVIRONMENT`, `LOG_LEVEL` and `VERSION`.
/// This is the recommended entrypoint for typical services.
pub fn init() -> Result<&'static Logger, InitError> {
    let config = LoggerConfig::from_provider(&EnvConfig::load_bundled());
    init_with_config(config, Arc::new(StdoutSink))
}
