//! Tracing setup.

use advisor_infrastructure::AdvisorConfig;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber: an `EnvFilter` (from `RUST_LOG`, default
/// `info`), a stderr fmt layer and, when `log_dir` is given, a daily-rolling
/// `advisor.log` file layer.
///
/// Keep the returned guard alive for as long as file logging is needed.
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let stderr_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "advisor.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(non_blocking);

            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(file_layer)
                .try_init();
            Some(guard)
        }
        None => {
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init();
            None
        }
    }
}

/// [`init_tracing`] with the log directory resolved from `config`.
pub fn init_tracing_from_config(config: &AdvisorConfig) -> Option<WorkerGuard> {
    let log_dir = config.log_dir();
    if log_dir.is_none() {
        tracing::warn!("[telemetry] No log directory available; logging to stderr only");
    }
    init_tracing(log_dir.as_deref())
}
