//! View command - interactive terminal chart.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{get_export_dir, RadarConfig};
use crate::data::read_table;
use crate::tui::{self, App};


/// Run the view command.
pub fn run(file: &Path, sheet: Option<&str>, label: Option<&str>, config_path: Option<&Path>) -> Result<()> {
    let config = RadarConfig::load(config_path)?;
    let table = read_table(file, sheet)?;

    let app = App::new(table, config, label, get_export_dir())
        .with_context(|| format!("Failed to open {}", file.display()))?;

    // Log lines would corrupt the alternate screen
    let level = log::max_level();
    log::set_max_level(log::LevelFilter::Off);
    let result = tui::run(app);
    log::set_max_level(level);

    result
}
