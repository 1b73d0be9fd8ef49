//! Application paths, defaults and control bounds.

use std::ops::RangeInclusive;
use std::path::PathBuf;


/// Palette assigned to entities by selection order.
pub const DEFAULT_PALETTE: [&str; 5] = ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd"];

/// Multiplier applied to the data maximum under the dynamic axis policy.
pub const DEFAULT_HEADROOM: f64 = 1.1;

/// Axis used for percentile-scaled data.
pub const DEFAULT_FIXED_RANGE: (f64, f64) = (0.0, 100.0);

/// How many numeric columns / label values are preselected.
pub const DEFAULT_METRIC_COUNT: usize = 5;
pub const DEFAULT_ENTITY_COUNT: usize = 3;

/// Control bounds.
pub const LABEL_FONT_SIZE_RANGE: RangeInclusive<u32> = 10..=24;
pub const VALUE_FONT_SIZE_RANGE: RangeInclusive<u32> = 8..=20;
pub const LINE_WIDTH_RANGE: RangeInclusive<u32> = 1..=5;
pub const MARKER_SIZE_RANGE: RangeInclusive<u32> = 4..=12;
pub const FILL_OPACITY_RANGE: RangeInclusive<f64> = 0.0..=1.0;

/// Canvas size and margins (left, right, top, bottom) in pixels.
pub const DEFAULT_CHART_WIDTH: u32 = 1000;
pub const DEFAULT_CHART_HEIGHT: u32 = 700;
pub const CHART_MARGINS: (u32, u32, u32, u32) = (80, 80, 50, 80);


/// Get the application directory.
pub fn get_app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".radar-compare")
}


/// Get the default config file path.
pub fn get_config_path() -> PathBuf {
    get_app_dir().join("config.json")
}


/// Get the directory exported charts land in when no output path is given.
pub fn get_export_dir() -> PathBuf {
    get_app_dir().join("exports")
}
