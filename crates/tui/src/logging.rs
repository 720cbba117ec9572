//! File logging for the chat UI.
//!
//! The terminal is owned by ratatui while the UI runs, so tracing output
//! goes to a daily-rotated file instead of stderr.

use ng_core::config::CONFIG_DIR;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_PREFIX: &str = "netgenius-tui.log";

/// `.netgenius/logs` under `root` for initialized projects, otherwise a
/// directory under the system temp dir so no project files are created.
pub fn default_log_dir(root: &Path) -> PathBuf {
    let config_dir = root.join(CONFIG_DIR);
    if config_dir.is_dir() {
        config_dir.join("logs")
    } else {
        std::env::temp_dir().join("netgenius")
    }
}

/// Install a global subscriber writing to `log_dir`.
///
/// Keep the returned guard alive for the lifetime of the UI; dropping it
/// flushes and stops the background writer.
pub fn init_file_logging(log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(false);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()?;

    Ok(file_guard)
}
