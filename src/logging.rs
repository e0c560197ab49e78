use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable that overrides the configured log level.
pub const LOG_ENV: &str = "JAPVOC_LOG";

/// Keeps the non-blocking writer flushing; drop it only at exit.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

fn env_filter(log_level: &str) -> EnvFilter {
    let directive = std::env::var(LOG_ENV).unwrap_or_else(|_| log_level.to_string());
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to a daily rolling file under `log_dir`. The terminal belongs to the
/// UI, so nothing is written to stdout/stderr here. Falls back to no
/// logging at all if the directory cannot be created.
pub fn init_file_tracing(log_level: &str, log_dir: &Path) -> Option<FileLogGuard> {
    if let Err(err) = std::fs::create_dir_all(log_dir) {
        eprintln!("failed to create log directory {}: {err}", log_dir.display());
        return None;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "japvoc.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    let installed = tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(file_layer)
        .try_init()
        .is_ok();

    installed.then(|| FileLogGuard { _guard: guard })
}

/// Log to stderr, for non-interactive commands.
pub fn init_stderr_tracing(log_level: &str) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(stderr_layer)
        .try_init();
}
