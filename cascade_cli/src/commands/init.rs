//! Write the sample data set and make it the default data file

use crate::config::Config;
use anyhow::{Context, Result};
use cascade_common::FormData;
use console::style;
use std::path::Path;

/// Handle init command
pub fn run(path: &Path, force: bool) -> Result<()> {
    use cliclack::{confirm, intro, outro, outro_cancel};

    intro(style(" cascade init ").on_cyan().black().to_string())?;

    if path.exists() && !force {
        let overwrite = confirm(format!("{} already exists. Overwrite it?", path.display()))
            .initial_value(false)
            .interact()?;
        if !overwrite {
            outro_cancel("Left the existing file untouched")?;
            return Ok(());
        }
    }

    write_sample(path)?;
    cliclack::log::success(format!("Wrote sample form data to {}", path.display()))?;

    let mut config = Config::load()?;
    config.data_file = Some(
        path.canonicalize()
            .with_context(|| format!("Failed to resolve {}", path.display()))?,
    );
    config.save()?;

    outro(format!(
        "Default data file set. Try {}",
        style("cascade render").cyan()
    ))?;

    Ok(())
}

fn write_sample(path: &Path) -> Result<()> {
    FormData::sample()
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}
