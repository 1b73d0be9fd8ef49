//! Config command - show or create the configuration file.

use std::path::Path;

use anyhow::Result;

use crate::config::{get_config_path, RadarConfig};


/// Run the config command.
pub fn run(init: bool, path_only: bool, config_path: Option<&Path>) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);

    if path_only {
        println!("{}", path.display());
        return Ok(());
    }

    if init {
        RadarConfig::write_default(&path)?;
        println!("\x1b[32m+ Wrote default config to: {}\x1b[0m", path.display());
        return Ok(());
    }

    let config = RadarConfig::load(config_path)?;
    if path.exists() {
        println!("\x1b[2m# {}\x1b[0m", path.display());
    } else {
        println!("\x1b[2m# defaults (no file at {})\x1b[0m", path.display());
    }
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}
