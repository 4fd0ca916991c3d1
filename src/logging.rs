//! Logging infrastructure for structured console output.
use tracing_subscriber::EnvFilter;

/// Console logger.
///
/// A thin wrapper over [`tracing`]: every message flows through the global
/// subscriber installed by [`Logger::init`], so the `RUST_LOG` environment
/// variable can still override the verbosity chosen on the command line.
#[derive(Debug, Clone, Copy)]
pub struct Logger;

impl Logger {
    /// Create a logger and install the global tracing subscriber.
    ///
    /// `verbose` lowers the console threshold to `DEBUG`; `RUST_LOG` takes
    /// precedence when set. Installation is best-effort so repeated calls
    /// (e.g. from tests) are harmless.
    #[must_use]
    pub fn init(verbose: bool) -> Self {
        let default = if verbose { "debug" } else { "info" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .try_init();
        Self
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "mudot::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }
}
