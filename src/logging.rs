use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Path of the debug log; logging is off when unset.
pub const ENV_DEBUG: &str = "PRESENTER_DEBUG";
/// Filter directives for the debug log, `debug` by default.
pub const ENV_LOG: &str = "PRESENTER_LOG";

/// Install a file-backed subscriber if `PRESENTER_DEBUG` names a log file.
///
/// The terminal is reserved for the report, so nothing is ever logged there.
/// Returns whether a subscriber was installed.
pub fn init() -> Result<bool> {
    let Some(path) = std::env::var_os(ENV_DEBUG) else {
        return Ok(false);
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)
        .with_context(|| format!("failed to open debug log {}", path.to_string_lossy()))?;

    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {}", e))?;
    Ok(true)
}
