//! File logging via `tracing`.
//!
//! The TUI owns the terminal, so log lines go to a file. `RUST_LOG` takes
//! precedence over `logging.level`.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, default_log_path};

/// Where log lines go, or `None` when logging is off or no location is known.
pub fn resolve_log_path(settings: &LoggingSettings) -> Option<PathBuf> {
    if !settings.enabled {
        return None;
    }
    settings.file.clone().or_else(default_log_path)
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Returns the log file in use.
pub fn init(settings: &LoggingSettings) -> io::Result<Option<PathBuf>> {
    let Some(path) = resolve_log_path(settings) else {
        return Ok(None);
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let subscriber = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(env_filter(&settings.level))
        .finish();
    tracing::subscriber::set_global_default(subscriber).map_err(io::Error::other)?;

    Ok(Some(path))
}
