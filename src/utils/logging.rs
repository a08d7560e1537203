//! Tracing setup
//!
//! The interactive UI owns the terminal, so it only logs when `--log-file` is
//! given. Subcommands log warnings to stderr unless `RUST_LOG` says otherwise.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

const FILE_DEFAULT_FILTER: &str = "gcp_shortcuts=info";
const STDERR_DEFAULT_FILTER: &str = "gcp_shortcuts=warn";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global tracing subscriber
///
/// - `log_file` set: append to that file
/// - interactive without a log file: no subscriber, events are dropped
/// - otherwise: stderr
pub fn init_tracing(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;

        tracing_subscriber::fmt()
            .with_env_filter(env_filter(FILE_DEFAULT_FILTER))
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init()
            .map_err(|e| anyhow!("Failed to install log subscriber: {e}"))?;
    } else if !interactive {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(STDERR_DEFAULT_FILTER))
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow!("Failed to install log subscriber: {e}"))?;
    }

    Ok(())
}
