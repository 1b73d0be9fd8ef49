//! Render command - draw a radar chart to a file.

use std::path::Path;

use anyhow::{bail, Result};

use crate::cli::{AxisArg, FormatArg, MissingArg, MultiRowArg, RenderArgs};
use crate::config::{get_export_dir, AxisRangePolicy, MissingEntityPolicy, MultiRowPolicy, RadarConfig};
use crate::data::read_table;
use crate::transform::{build_chart, resolve_selection};
use crate::visualization::{default_export_path, export_chart, open_file, render_rows_table, ExportFormat};


/// Run the render command.
pub fn run(args: RenderArgs) -> Result<()> {
    let mut config = RadarConfig::load(args.config.as_deref())?;
    apply_overrides(&mut config, &args)?;
    config.validate()?;
    let format = resolve_format(args.format, args.output.as_deref())?;

    let table = read_table(&args.file, args.sheet.as_deref())?;
    log::info!("loaded {} rows from {}", table.row_count(), args.file.display());

    let selection = resolve_selection(
        &table,
        args.label.as_deref(),
        &args.metrics,
        &args.entities,
        &config,
    )?;

    if !selection.is_complete() {
        println!("Select at least one metric and one entity.");
        if selection.metrics.is_empty() {
            println!("\x1b[2mNo numeric columns to use as metrics. Try 'radar columns {}'.\x1b[0m", args.file.display());
        } else {
            println!("\x1b[2mColumn {} has no values to compare.\x1b[0m", selection.label_column);
        }
        return Ok(());
    }

    let chart = build_chart(&table, &selection, &config)?;

    for entity in &chart.skipped {
        println!(
            "\x1b[33mWarning: no row has {} = {:?}, skipped\x1b[0m",
            selection.label_column, entity
        );
    }

    if chart.series.is_empty() {
        println!("None of the selected entities match a row. No chart written.");
        return Ok(());
    }

    if args.rows {
        println!("{}", render_rows_table(&table, &selection));
    }

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_export_path(&get_export_dir(), format));

    export_chart(&chart, &config.style, format, &output_path)?;

    println!(
        "\x1b[32m+ Exported {} series x {} metrics to: {}\x1b[0m",
        chart.series.len(),
        chart.metrics.len(),
        output_path.display()
    );

    if args.open {
        println!("Opening {}...", format.extension().to_uppercase());
        open_file(&output_path)?;
    }

    Ok(())
}


/// Apply command line flags on top of the loaded config.
fn apply_overrides(config: &mut RadarConfig, args: &RenderArgs) -> Result<()> {
    match args.axis {
        Some(AxisArg::Dynamic) if !matches!(config.axis_range, AxisRangePolicy::DynamicMax { .. }) => {
            config.axis_range = AxisRangePolicy::default();
        }
        Some(AxisArg::Fixed) if !matches!(config.axis_range, AxisRangePolicy::Fixed { .. }) => {
            config.axis_range = AxisRangePolicy::fixed_default();
        }
        _ => {}
    }

    if let Some(max) = args.range_max {
        if args.axis == Some(AxisArg::Dynamic) {
            bail!("--range-max needs a fixed axis, not --axis dynamic");
        }
        let min = match config.axis_range {
            AxisRangePolicy::Fixed { min, .. } => min,
            AxisRangePolicy::DynamicMax { .. } => 0.0,
        };
        config.axis_range = AxisRangePolicy::Fixed { min, max };
    }

    if let Some(value) = args.headroom {
        match &mut config.axis_range {
            AxisRangePolicy::DynamicMax { headroom } => *headroom = value,
            AxisRangePolicy::Fixed { .. } => bail!("--headroom only applies to the dynamic axis"),
        }
    }

    if let Some(multi_row) = args.multi_row {
        config.multi_row = match multi_row {
            MultiRowArg::First => MultiRowPolicy::FirstMatch,
            MultiRowArg::Flatten => MultiRowPolicy::FlattenAll,
        };
    }

    if let Some(on_missing) = args.on_missing {
        config.missing_entity = match on_missing {
            MissingArg::Skip => MissingEntityPolicy::Skip,
            MissingArg::Fail => MissingEntityPolicy::Fail,
        };
    }

    if args.no_text {
        config.text_labels = false;
    }

    let style = &mut config.style;
    if let Some(title) = &args.title {
        style.title = Some(title.clone());
    }
    if let Some(v) = args.label_font_size {
        style.label_font_size = v;
    }
    if let Some(v) = args.value_font_size {
        style.value_font_size = v;
    }
    if let Some(v) = args.line_width {
        style.line_width = v;
    }
    if let Some(v) = args.marker_size {
        style.marker_size = v;
    }
    if let Some(v) = args.fill_opacity {
        style.fill_opacity = v;
    }
    if let Some(v) = args.width {
        style.width = v;
    }
    if let Some(v) = args.height {
        style.height = v;
    }

    Ok(())
}


/// Pick the export format from `--format` and the output file extension.
///
/// An output extension must name a supported format and agree with `--format`.
fn resolve_format(format: Option<FormatArg>, output: Option<&Path>) -> Result<ExportFormat> {
    let requested = format.map(export_format);

    let ext = match output.and_then(|path| path.extension()) {
        Some(ext) => ext.to_string_lossy().to_string(),
        None => return Ok(requested.unwrap_or(ExportFormat::Svg)),
    };

    let from_ext = match output.and_then(ExportFormat::from_path) {
        Some(format) => format,
        None => bail!("Unsupported output extension .{} (use .svg, .png or .json)", ext),
    };

    match requested {
        Some(format) if format != from_ext => bail!(
            "--format {} does not match output extension .{}",
            format.extension(),
            ext
        ),
        _ => Ok(from_ext),
    }
}


fn export_format(format: FormatArg) -> ExportFormat {
    match format {
        FormatArg::Svg => ExportFormat::Svg,
        FormatArg::Png => ExportFormat::Png,
        FormatArg::Json => ExportFormat::Json,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: RenderArgs,
    }

    fn args(extra: &[&str]) -> RenderArgs {
        let mut argv = vec!["radar", "data.csv"];
        argv.extend_from_slice(extra);
        Wrapper::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = RadarConfig::default();
        apply_overrides(&mut config, &args(&[])).unwrap();
        assert_eq!(config, RadarConfig::default());
    }

    #[test]
    fn test_axis_overrides() {
        let mut config = RadarConfig::default();
        apply_overrides(&mut config, &args(&["--axis", "fixed"])).unwrap();
        assert_eq!(config.axis_range, AxisRangePolicy::Fixed { min: 0.0, max: 100.0 });

        let mut config = RadarConfig::default();
        apply_overrides(&mut config, &args(&["--range-max", "10"])).unwrap();
        assert_eq!(config.axis_range, AxisRangePolicy::Fixed { min: 0.0, max: 10.0 });

        let mut config = RadarConfig::default();
        apply_overrides(&mut config, &args(&["--headroom", "1.5"])).unwrap();
        assert_eq!(config.axis_range, AxisRangePolicy::DynamicMax { headroom: 1.5 });
    }

    #[test]
    fn test_conflicting_axis_flags() {
        let mut config = RadarConfig::default();
        assert!(apply_overrides(&mut config, &args(&["--axis", "fixed", "--headroom", "1.2"])).is_err());

        let mut config = RadarConfig::default();
        assert!(apply_overrides(&mut config, &args(&["--axis", "dynamic", "--range-max", "5"])).is_err());
    }

    #[test]
    fn test_policy_and_style_overrides() {
        let mut config = RadarConfig::default();
        apply_overrides(
            &mut config,
            &args(&[
                "--multi-row", "flatten",
                "--on-missing", "fail",
                "--no-text",
                "--line-width", "5",
                "--fill-opacity", "0.5",
                "--title", "Ratings",
            ]),
        )
        .unwrap();

        assert_eq!(config.multi_row, MultiRowPolicy::FlattenAll);
        assert_eq!(config.missing_entity, MissingEntityPolicy::Fail);
        assert!(!config.text_labels);
        assert_eq!(config.style.line_width, 5);
        assert_eq!(config.style.fill_opacity, 0.5);
        assert_eq!(config.style.title.as_deref(), Some("Ratings"));
    }

    #[test]
    fn test_resolve_format() {
        assert_eq!(resolve_format(None, None).unwrap(), ExportFormat::Svg);
        assert_eq!(resolve_format(Some(FormatArg::Png), None).unwrap(), ExportFormat::Png);
        assert_eq!(resolve_format(None, Some(Path::new("out/chart.JSON"))).unwrap(), ExportFormat::Json);
        assert_eq!(resolve_format(Some(FormatArg::Png), Some(Path::new("chart"))).unwrap(), ExportFormat::Png);
        assert_eq!(
            resolve_format(Some(FormatArg::Svg), Some(Path::new("chart.svg"))).unwrap(),
            ExportFormat::Svg
        );
    }

    #[test]
    fn test_resolve_format_rejects_mismatched_extension() {
        assert!(resolve_format(None, Some(Path::new("chart.pdf"))).is_err());
        assert!(resolve_format(Some(FormatArg::Svg), Some(Path::new("chart.pdf"))).is_err());

        let err = resolve_format(Some(FormatArg::Png), Some(Path::new("x.svg"))).unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn test_out_of_range_style_fails_validation() {
        let mut config = RadarConfig::default();
        apply_overrides(&mut config, &args(&["--marker-size", "40"])).unwrap();
        assert!(config.validate().is_err());
    }
}
