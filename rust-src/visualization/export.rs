//! Export of rendered charts to SVG, PNG and JSON files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use crate::config::ChartStyle;
use crate::models::Chart;

use super::radar::render_svg;


/// Output file format of an exported chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Png,
    Json,
}


impl ExportFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "svg" => Some(ExportFormat::Svg),
            "png" => Some(ExportFormat::Png),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
            ExportFormat::Json => "json",
        }
    }
}


/// Timestamped file name inside `dir`, e.g. `radar-20240115-103000.svg`.
pub fn default_export_path(dir: &Path, format: ExportFormat) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    dir.join(format!("radar-{}.{}", stamp, format.extension()))
}


/// Write `chart` to `output_path` in the given format.
pub fn export_chart(
    chart: &Chart,
    style: &ChartStyle,
    format: ExportFormat,
    output_path: &Path,
) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    match format {
        ExportFormat::Svg => export_svg(chart, style, output_path),
        ExportFormat::Png => export_png(chart, style, output_path),
        ExportFormat::Json => export_json(chart, output_path),
    }
}


/// Export chart as SVG.
pub fn export_svg(chart: &Chart, style: &ChartStyle, output_path: &Path) -> Result<()> {
    let svg_content = render_svg(chart, style)?;

    std::fs::write(output_path, svg_content)
        .with_context(|| format!("Failed to write SVG to {}", output_path.display()))?;

    Ok(())
}


/// Export chart as PNG.
pub fn export_png(chart: &Chart, style: &ChartStyle, output_path: &Path) -> Result<()> {
    let svg_content = render_svg(chart, style)?;

    // Text needs real fonts; the default font database is empty
    let mut options = resvg::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = resvg::usvg::Tree::from_str(&svg_content, &options)
        .context("Failed to parse SVG")?;

    let size = tree.size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width() as u32, size.height() as u32)
        .context("Failed to create pixmap")?;

    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    pixmap.save_png(output_path)
        .with_context(|| format!("Failed to save PNG to {}", output_path.display()))?;

    Ok(())
}


/// Export the polar-series description as pretty JSON.
pub fn export_json(chart: &Chart, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(chart)?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON to {}", output_path.display()))?;

    Ok(())
}


/// Open file with default application.
pub fn open_file(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()
            .context("Failed to open file")?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.to_string_lossy()])
            .spawn()
            .context("Failed to open file")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()
            .context("Failed to open file")?;
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AxisRange, Series, SeriesPoint};

    fn chart() -> Chart {
        Chart {
            metrics: vec!["Speed".into(), "Reliability".into(), "Power".into()],
            series: vec![Series {
                name: "A".into(),
                color: "#2ca02c".into(),
                points: vec![
                    SeriesPoint { metric: "Speed".into(), value: 8.0 },
                    SeriesPoint { metric: "Reliability".into(), value: 9.0 },
                    SeriesPoint { metric: "Power".into(), value: 4.0 },
                ],
                matched_rows: 1,
            }],
            axis: AxisRange::new(0.0, 9.9),
            skipped: vec![],
            text_labels: false,
        }
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("a.SVG")), Some(ExportFormat::Svg));
        assert_eq!(ExportFormat::from_path(Path::new("a.png")), Some(ExportFormat::Png));
        assert_eq!(ExportFormat::from_path(Path::new("a.json")), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_path(Path::new("a.gif")), None);
        assert_eq!(ExportFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_default_export_path() {
        let path = default_export_path(Path::new("/tmp/out"), ExportFormat::Png);
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("radar-"));
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn test_export_svg_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let svg_path = dir.path().join("nested").join("chart.svg");
        let json_path = dir.path().join("chart.json");

        export_chart(&chart(), &ChartStyle::default(), ExportFormat::Svg, &svg_path).unwrap();
        export_chart(&chart(), &ChartStyle::default(), ExportFormat::Json, &json_path).unwrap();

        let svg = std::fs::read_to_string(&svg_path).unwrap();
        assert!(svg.starts_with("<svg"));

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["series"][0]["name"], "A");
        assert_eq!(json["series"][0]["points"][1]["value"], 9.0);
        assert_eq!(json["axis"]["max"], 9.9);
    }

    #[test]
    fn test_export_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");

        export_png(&chart(), &ChartStyle::default(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
