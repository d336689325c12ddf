//! Log setup for the binaries.
//!
//! The MCP server owns stdout for its transport, so it logs to a file
//! (`mcp.log` in the project data directory, rotated past 1MB). The CLI
//! logs to stderr. Both honour `TODO_LOG` over the configured level.

use crate::config::LOG_ENV_VAR;
use crate::error::{Error, Result};
use std::any::Any;
use std::fs::{self, OpenOptions};
use std::panic;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Maximum log file size before rotation (1MB).
const MAX_LOG_SIZE: u64 = 1_048_576;

/// Build the filter from `TODO_LOG`, falling back to `default_level`.
#[must_use]
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Move the log aside to `<name>.log.old` if it has grown past the limit.
///
/// Returns true if the file was rotated.
pub fn rotate_if_large(path: &Path) -> bool {
    let Ok(metadata) = fs::metadata(path) else {
        return false;
    };
    if metadata.len() <= MAX_LOG_SIZE {
        return false;
    }
    fs::rename(path, path.with_extension("log.old")).is_ok()
}

/// Send logs to a file, appending.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a global subscriber is
/// already installed.
pub fn init_file(log_path: &Path, default_level: &str) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    rotate_if_large(log_path);

    let file = OpenOptions::new().create(true).append(true).open(log_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    tracing::info!(path = %log_path.display(), "logging to file");
    Ok(())
}

/// Send logs to stderr.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_stderr(default_level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}

/// Install a panic hook that records panics in the log before the default
/// hook runs.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let location = info.location().map_or_else(
            || "unknown".to_string(),
            |loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()),
        );
        tracing::error!(%location, payload = %panic_payload(info.payload()), "panic");
        original_hook(info);
    }));
}

/// Render a panic payload as text.
fn panic_payload(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}
