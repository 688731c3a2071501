use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable naming the log file
pub const LOG_FILE_ENV: &str = "ENVSNAP_LOG_FILE";

/// Install file logging when `ENVSNAP_LOG_FILE` is set. The viewer owns the
/// terminal, so nothing is written to stdout or stderr. Returns the log path
/// when logging was enabled.
pub fn init_tracing() -> Result<Option<PathBuf>> {
    let Some(log_path) = std::env::var_os(LOG_FILE_ENV).map(PathBuf::from) else {
        return Ok(None);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    // RUST_LOG wins over the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(Some(log_path))
}
