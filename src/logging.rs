// File logger setup. The console belongs to the menu, so log records go to a file.
use crate::context::AppContext;
use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;
use std::path::PathBuf;

/// Installs a `WriteLogger` appending to the context's log file.
/// Returns the log path on success.
pub fn init(ctx: &dyn AppContext, level: LevelFilter) -> Result<PathBuf> {
    let path = ctx
        .get_log_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine log file location"))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {:?}", path))?;

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .build();
    WriteLogger::init(level, config, file).context("A logger was already installed")?;
    Ok(path)
}
