//! One-shot record emitted when the process is stopped by a signal.
//!
//! Installing tokio signal listeners replaces the default "terminate on
//! SIGINT/SIGTERM" disposition, so after logging the hook exits the
//! process itself with the conventional `128 + signo` status.
//!
//! The exit record is written on a blocking thread and given at most
//! [`FIRE_TIMEOUT`] (or the duration set with [`ExitHook::with_timeout`]).
//! If the sink is stuck past that, or a second signal arrives while the
//! record is being written, the process exits without waiting further.

use crate::logger::Logger;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Message of the record written when a termination signal arrives.
pub const EXIT_MESSAGE: &str = "Application will stop probably due to a OS signal";

/// Default upper bound on writing the exit record.
pub const FIRE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(thiserror::Error, Debug)]
pub enum ExitHookError {
    #[error("failed to build signal runtime: {0}")]
    Runtime(#[source] io::Error),

    #[error("failed to install signal handlers: {0}")]
    Signal(#[source] io::Error),

    #[error("failed to spawn signal thread: {0}")]
    Thread(#[source] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Interrupt,
    Terminate,
}

impl Signal {
    fn name(self) -> &'static str {
        match self {
            Signal::Interrupt => "SIGINT",
            Signal::Terminate => "SIGTERM",
        }
    }

    fn exit_code(self) -> i32 {
        match self {
            Signal::Interrupt => 130,
            Signal::Terminate => 143,
        }
    }
}

/// Signal streams, created while a runtime is entered so the handlers are
/// in place before [`ExitHook::install`] returns.
#[cfg(unix)]
struct Listener {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Listener {
    fn new() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Listener {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    async fn recv(&mut self) -> Signal {
        tokio::select! {
            _ = self.interrupt.recv() => Signal::Interrupt,
            _ = self.terminate.recv() => Signal::Terminate,
        }
    }
}

#[cfg(windows)]
struct Listener {
    ctrl_c: tokio::signal::windows::CtrlC,
}

#[cfg(windows)]
impl Listener {
    fn new() -> io::Result<Self> {
        Ok(Listener {
            ctrl_c: tokio::signal::windows::ctrl_c()?,
        })
    }

    async fn recv(&mut self) -> Signal {
        self.ctrl_c.recv().await;
        Signal::Interrupt
    }
}

/// Writes [`EXIT_MESSAGE`] at most once per hook.
#[derive(Clone, Debug)]
pub struct ExitHook {
    logger: Logger,
    fired: Arc<AtomicBool>,
    timeout: Duration,
}

impl ExitHook {
    pub fn new(logger: Logger) -> Self {
        ExitHook {
            logger,
            fired: Arc::new(AtomicBool::new(false)),
            timeout: FIRE_TIMEOUT,
        }
    }

    /// Bound how long a signal waits for the exit record before exiting.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Emit the exit record and flush the sink.
    ///
    /// Returns `true` on the call that emitted it and `false` afterwards.
    /// Never terminates the process.
    pub fn fire(&self, signal: &str) -> bool {
        if self.fired.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.logger.with_field("signal", signal).info(EXIT_MESSAGE);
        self.logger.flush();
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Install the signal handlers and start listening on a dedicated
    /// thread driving a current-thread runtime.
    ///
    /// The handlers are registered before this returns, whether or not the
    /// caller runs inside a Tokio runtime of its own.
    pub fn install(self) -> Result<ExitHook, ExitHookError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ExitHookError::Runtime)?;

        let listener = {
            let _guard = runtime.enter();
            Listener::new().map_err(ExitHookError::Signal)?
        };

        let task = self.clone().run(listener);
        std::thread::Builder::new()
            .name("gelf-exit-hook".to_string())
            .spawn(move || runtime.block_on(task))
            .map_err(ExitHookError::Thread)?;

        Ok(self)
    }

    async fn run(self, mut listener: Listener) {
        let first = listener.recv().await;

        let hook = self.clone();
        let write = tokio::task::spawn_blocking(move || hook.fire(first.name()));

        let signal = tokio::select! {
            written = tokio::time::timeout(self.timeout, write) => {
                if written.is_err() {
                    eprintln!(
                        "exit record not written within {:?}, exiting anyway",
                        self.timeout
                    );
                }
                first
            }
            second = listener.recv() => second,
        };

        std::process::exit(signal.exit_code());
    }
}

/// Start listening for termination signals on behalf of `logger` with the
/// default [`FIRE_TIMEOUT`].
pub fn register(logger: Logger) -> Result<ExitHook, ExitHookError> {
    ExitHook::new(logger).install()
}
