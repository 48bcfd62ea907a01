//! File-based tracing setup.
//!
//! The TUI owns the terminal, so log output goes to a daily-rolling file in
//! the data directory instead of stdout. The `log` facade is bridged so
//! view code can use `log::info!` alongside `tracing` in the core.

use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing with an env-filter and a daily rolling log file.
///
/// Returns the appender guard; `main` must hold it for the process
/// lifetime or buffered lines are lost on exit. Returns `None` when a
/// subscriber is already installed (tests) or the log directory cannot be
/// created.
pub fn init() -> Option<WorkerGuard> {
    let log_dir = log_dir();
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("warning: cannot create log dir {}: {e}", log_dir.display());
        return None;
    }

    let appender = tracing_appender::rolling::daily(&log_dir, "intervue.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Route log:: macros into tracing; ignore the error if a logger is
    // already set.
    let _ = tracing_log::LogTracer::init();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .ok()?;

    Some(guard)
}

fn log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("intervue").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
