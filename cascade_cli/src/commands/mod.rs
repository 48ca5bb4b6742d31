//! CLI command implementations

pub mod check;
pub mod init;
pub mod render;

use crate::config::Config;
use anyhow::{Context, Result};
use cascade_common::FormData;
use std::path::{Path, PathBuf};

/// Resolve which data file to use: `--data`, then the config file
fn data_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        return Ok(Some(path.to_path_buf()));
    }
    Ok(Config::load()?.data_file)
}

/// Load the form data, falling back to the built-in sample
pub fn load_data(explicit: Option<&Path>) -> Result<FormData> {
    match data_path(explicit)? {
        Some(path) => {
            tracing::debug!("Loading form data from {}", path.display());
            FormData::load(&path)
                .with_context(|| format!("Failed to load form data from {}", path.display()))
        }
        None => {
            tracing::debug!("No data file configured, using built-in sample");
            Ok(FormData::sample())
        }
    }
}
