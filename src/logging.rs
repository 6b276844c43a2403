use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;

use crate::config;

/// Turn on logging when `PAIRDIFF_LOG` is set (its value is the filter, e.g.
/// `debug` or `pairdiff=trace`). Output goes to `$PAIRDIFF_LOG_FILE`, or
/// `pairdiff.log` in the config directory, so the alternate screen stays clean.
pub fn init() -> Result<()> {
    let Ok(filter) = std::env::var("PAIRDIFF_LOG") else {
        return Ok(());
    };

    let path = log_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    env_logger::Builder::new()
        .parse_filters(&filter)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")?;

    log::info!("pairdiff {} logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    Ok(())
}

fn log_path() -> PathBuf {
    std::env::var_os("PAIRDIFF_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| config::config_dir().join("pairdiff.log"))
}
