//! Chart configuration: palette, policies and cosmetic style.

use std::path::Path;

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::settings::{
    get_config_path,
    CHART_MARGINS,
    DEFAULT_CHART_HEIGHT,
    DEFAULT_CHART_WIDTH,
    DEFAULT_ENTITY_COUNT,
    DEFAULT_FIXED_RANGE,
    DEFAULT_HEADROOM,
    DEFAULT_METRIC_COUNT,
    DEFAULT_PALETTE,
    FILL_OPACITY_RANGE,
    LABEL_FONT_SIZE_RANGE,
    LINE_WIDTH_RANGE,
    MARKER_SIZE_RANGE,
    VALUE_FONT_SIZE_RANGE,
};


/// How the shared radial axis is sized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum AxisRangePolicy {
    /// `[0, max over all rows of the selected metrics * headroom]`.
    DynamicMax { headroom: f64 },
    /// A constant range, for data that is already percentile-scaled.
    Fixed { min: f64, max: f64 },
}


impl Default for AxisRangePolicy {
    fn default() -> Self {
        AxisRangePolicy::DynamicMax { headroom: DEFAULT_HEADROOM }
    }
}


impl AxisRangePolicy {
    pub fn fixed_default() -> Self {
        AxisRangePolicy::Fixed {
            min: DEFAULT_FIXED_RANGE.0,
            max: DEFAULT_FIXED_RANGE.1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AxisRangePolicy::DynamicMax { .. } => "dynamic-max",
            AxisRangePolicy::Fixed { .. } => "fixed",
        }
    }
}


/// What to do when several rows share one label value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MultiRowPolicy {
    /// Use the first matching row only.
    #[default]
    FirstMatch,
    /// Concatenate the metric values of every matching row.
    FlattenAll,
}


impl MultiRowPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            MultiRowPolicy::FirstMatch => "first-match",
            MultiRowPolicy::FlattenAll => "flatten-all",
        }
    }
}


/// What to do when a chosen label value matches no row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingEntityPolicy {
    /// Leave the entity out of the chart and warn.
    #[default]
    Skip,
    /// Fail the whole render.
    Fail,
}


/// Rendering parameters. None of these affect the data transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub label_font_size: u32,
    pub value_font_size: u32,
    pub line_width: u32,
    pub marker_size: u32,
    pub fill_opacity: f64,
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
}


impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            label_font_size: 14,
            value_font_size: 12,
            line_width: 3,
            marker_size: 8,
            fill_opacity: 0.2,
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
            title: None,
        }
    }
}


impl ChartStyle {
    pub fn validate(&self) -> Result<()> {
        check_range("label_font_size", self.label_font_size, &LABEL_FONT_SIZE_RANGE)?;
        check_range("value_font_size", self.value_font_size, &VALUE_FONT_SIZE_RANGE)?;
        check_range("line_width", self.line_width, &LINE_WIDTH_RANGE)?;
        check_range("marker_size", self.marker_size, &MARKER_SIZE_RANGE)?;

        if !FILL_OPACITY_RANGE.contains(&self.fill_opacity) {
            bail!(
                "fill_opacity must be between {} and {}, got {}",
                FILL_OPACITY_RANGE.start(),
                FILL_OPACITY_RANGE.end(),
                self.fill_opacity
            );
        }

        let (left, right, top, bottom) = CHART_MARGINS;
        if self.width <= left + right || self.height <= top + bottom {
            bail!(
                "chart size {}x{} leaves no room for the plot (margins take {}x{})",
                self.width,
                self.height,
                left + right,
                top + bottom
            );
        }

        Ok(())
    }
}


/// Full configuration of one radar pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    pub palette: Vec<String>,
    pub axis_range: AxisRangePolicy,
    pub multi_row: MultiRowPolicy,
    pub missing_entity: MissingEntityPolicy,
    pub text_labels: bool,
    pub style: ChartStyle,
    pub default_metric_count: usize,
    pub default_entity_count: usize,
}


impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            axis_range: AxisRangePolicy::default(),
            multi_row: MultiRowPolicy::default(),
            missing_entity: MissingEntityPolicy::default(),
            text_labels: true,
            style: ChartStyle::default(),
            default_metric_count: DEFAULT_METRIC_COUNT,
            default_entity_count: DEFAULT_ENTITY_COUNT,
        }
    }
}


impl RadarConfig {
    /// Load the config from `path`, or from the default location.
    ///
    /// An explicit path must exist; a missing default file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let default_path = get_config_path();
        let (path, explicit) = match path {
            Some(p) => (p, true),
            None => (default_path.as_path(), false),
        };

        if !path.exists() {
            if explicit {
                bail!("Config file not found: {}", path.display());
            }
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: RadarConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;

        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the default config to `path`, refusing to overwrite.
    pub fn write_default(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("Config file already exists: {}", path.display());
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(&Self::default())?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.palette.is_empty() {
            bail!("palette must contain at least one color");
        }

        let hex = Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$")?;
        for color in &self.palette {
            if !hex.is_match(color) {
                bail!("palette color {:?} is not a #rgb or #rrggbb hex code", color);
            }
        }

        match self.axis_range {
            AxisRangePolicy::DynamicMax { headroom } => {
                if !headroom.is_finite() || headroom < 1.0 {
                    bail!("headroom must be a finite number >= 1, got {}", headroom);
                }
            }
            AxisRangePolicy::Fixed { min, max } => {
                if !min.is_finite() || !max.is_finite() || max <= min {
                    bail!("fixed axis range needs min < max, got [{}, {}]", min, max);
                }
            }
        }

        self.style.validate()
    }
}


fn check_range(name: &str, value: u32, range: &std::ops::RangeInclusive<u32>) -> Result<()> {
    if !range.contains(&value) {
        bail!(
            "{} must be between {} and {}, got {}",
            name,
            range.start(),
            range.end(),
            value
        );
    }
    Ok(())
}
