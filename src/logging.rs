use crate::error::{AResult, ChatError};
use std::{path::Path, sync::Mutex};
use tracing_subscriber::EnvFilter;

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Sends logs to `path`. The terminal belongs to the UI while it runs.
pub fn init_file(path: &Path, default_filter: &str) -> AResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(default_filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| ChatError::Logging(e.to_string()))
}

pub fn init_stderr(default_filter: &str) -> AResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(default_filter))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| ChatError::Logging(e.to_string()))
}
