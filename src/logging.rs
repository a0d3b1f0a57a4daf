use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Environment variable holding the log filter, e.g. `debug` or `expensetui=trace`.
pub(crate) const LOG_ENV: &str = "EXPENSETUI_LOG";

/// Send log output to `log_path` (appending). The terminal is left alone so
/// the TUI is never drawn over.
pub(crate) fn init(log_path: &Path) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_log)
        .try_init()
        .context("Failed to install log subscriber")?;
    Ok(())
}
