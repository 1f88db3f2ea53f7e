//! File-based logging. The TUI owns stdout, so tracing output goes to a daily
//! rolling file under the platform data directory.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{CatalogError, Result};

/// Fallback directory used when no home directory can be resolved.
const FALLBACK_LOG_DIR: &str = ".logs";
const LOG_FILE_PREFIX: &str = "book-connect";
/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "book_connect=info,warn";

/// Install the global subscriber. Keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn init_logging() -> Result<WorkerGuard> {
    let log_dir = log_dir();
    fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|err| CatalogError::Logging(err.to_string()))?;

    tracing::info!(dir = %log_dir.display(), "logging initialized");
    Ok(guard)
}

fn log_dir() -> PathBuf {
    ProjectDirs::from("", "", LOG_FILE_PREFIX)
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_LOG_DIR))
}
