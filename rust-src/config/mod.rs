//! Configuration and settings for radar-compare.

mod radar_config;
mod settings;

#[allow(unused_imports)]
pub use radar_config::{
    AxisRangePolicy,
    ChartStyle,
    MissingEntityPolicy,
    MultiRowPolicy,
    RadarConfig,
};

#[allow(unused_imports)]
pub use settings::{
    get_app_dir,
    get_config_path,
    get_export_dir,
    CHART_MARGINS,
    DEFAULT_PALETTE,
    FILL_OPACITY_RANGE,
    LABEL_FONT_SIZE_RANGE,
    LINE_WIDTH_RANGE,
    MARKER_SIZE_RANGE,
    VALUE_FONT_SIZE_RANGE,
};
