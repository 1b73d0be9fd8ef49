//! SVG radar chart renderer.

use std::f64::consts::PI;

use crate::config::{ChartStyle, CHART_MARGINS};
use crate::models::Chart;

use super::color::{hex_to_rgba, ColorError};


// Chart colors
const BACKGROUND: &str = "#ffffff";
const GRID: &str = "#f0f0f0";
const TICK_TEXT: &str = "gray";
const LABEL_TEXT: &str = "#333";

const TICK_FONT_SIZE: u32 = 10;
const TITLE_FONT_SIZE: u32 = 18;
const TARGET_TICKS: f64 = 5.0;

// Legend swatch geometry
const SWATCH_WIDTH: f64 = 24.0;
const LEGEND_GAP: f64 = 24.0;


/// Plot geometry derived from the canvas size.
struct Frame {
    cx: f64,
    cy: f64,
    radius: f64,
}


impl Frame {
    fn new(style: &ChartStyle) -> Self {
        let (left, right, top, bottom) = CHART_MARGINS;
        let plot_w = (style.width - left - right) as f64;
        let plot_h = (style.height - top - bottom) as f64;

        Self {
            cx: left as f64 + plot_w / 2.0,
            cy: top as f64 + plot_h / 2.0,
            radius: plot_w.min(plot_h) / 2.0 * 0.85,
        }
    }

    /// Angle of axis `index` out of `count`: first axis at 12 o'clock, counter-clockwise.
    fn angle(index: usize, count: usize) -> f64 {
        PI / 2.0 + 2.0 * PI * index as f64 / count.max(1) as f64
    }

    fn point(&self, angle: f64, fraction: f64) -> (f64, f64) {
        let r = self.radius * fraction;
        (self.cx + r * angle.cos(), self.cy - r * angle.sin())
    }
}


/// Render a chart as a standalone SVG document.
pub fn render_svg(chart: &Chart, style: &ChartStyle) -> Result<String, ColorError> {
    let frame = Frame::new(style);
    let axis_count = chart.metrics.len();

    let mut svg_parts = vec![
        format!(
            r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"#,
            w = style.width,
            h = style.height
        ),
        "<style>".to_string(),
        format!("  .grid {{ fill: none; stroke: {}; stroke-width: 1; }}", GRID),
        format!(
            "  .tick {{ fill: {}; font-size: {}px; font-family: sans-serif; }}",
            TICK_TEXT, TICK_FONT_SIZE
        ),
        format!(
            "  .category {{ fill: {}; font-size: {}px; font-weight: bold; font-family: sans-serif; }}",
            LABEL_TEXT, style.label_font_size
        ),
        format!(
            "  .legend-text {{ fill: {}; font-size: {}px; font-family: sans-serif; }}",
            LABEL_TEXT, style.label_font_size
        ),
        format!(
            "  .value {{ font-size: {}px; font-weight: bold; font-family: 'Arial Black', sans-serif; }}",
            style.value_font_size
        ),
        format!(
            "  .title {{ fill: {}; font-size: {}px; font-weight: bold; font-family: sans-serif; }}",
            LABEL_TEXT, TITLE_FONT_SIZE
        ),
        "</style>".to_string(),
        format!(
            r#"<rect width="{}" height="{}" fill="{}"/>"#,
            style.width, style.height, BACKGROUND
        ),
    ];

    if let Some(title) = &style.title {
        svg_parts.push(format!(
            r#"<text x="{}" y="30" class="title" text-anchor="middle">{}</text>"#,
            style.width / 2,
            xml_escape(title)
        ));
    }

    // Circular grid with tick labels along the first spoke
    let span = chart.axis.span();
    for tick in nice_ticks(chart.axis.min, chart.axis.max) {
        let fraction = if span > 0.0 { (tick - chart.axis.min) / span } else { 0.0 };
        if fraction <= 0.0 {
            continue;
        }
        svg_parts.push(format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" class="grid"/>"#,
            frame.cx,
            frame.cy,
            frame.radius * fraction
        ));
        svg_parts.push(format!(
            r#"<text x="{:.2}" y="{:.2}" class="tick">{}</text>"#,
            frame.cx + 4.0,
            frame.cy - frame.radius * fraction - 2.0,
            format_value(tick)
        ));
    }
    svg_parts.push(format!(
        r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" class="grid"/>"#,
        frame.cx, frame.cy, frame.radius
    ));

    // Spokes and category labels
    for (idx, metric) in chart.metrics.iter().enumerate() {
        let angle = Frame::angle(idx, axis_count);
        let (x, y) = frame.point(angle, 1.0);
        svg_parts.push(format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" class="grid"/>"#,
            frame.cx, frame.cy, x, y
        ));

        let offset = 10.0 + style.label_font_size as f64 * 0.3;
        let (lx, ly) = frame.point(angle, 1.0 + offset / frame.radius);
        let (anchor, baseline_shift) = label_anchor(angle, style.label_font_size as f64);
        svg_parts.push(format!(
            r#"<text x="{:.2}" y="{:.2}" class="category" text-anchor="{}">{}</text>"#,
            lx,
            ly + baseline_shift,
            anchor,
            xml_escape(metric)
        ));
    }

    // One closed trace per entity
    for series in &chart.series {
        let fill = hex_to_rgba(&series.color, style.fill_opacity)?;
        let vertices: Vec<(f64, f64)> = series
            .points
            .iter()
            .map(|p| {
                let idx = chart.metric_index(&p.metric).unwrap_or(0);
                frame.point(Frame::angle(idx, axis_count), chart.axis.fraction(p.value))
            })
            .collect();

        if vertices.is_empty() {
            continue;
        }

        let path: Vec<String> = vertices
            .iter()
            .enumerate()
            .map(|(i, (x, y))| format!("{}{:.2} {:.2}", if i == 0 { "M" } else { "L" }, x, y))
            .collect();

        svg_parts.push(r#"<g class="trace">"#.to_string());
        svg_parts.push(format!(
            r#"<path d="{} Z" fill="{}" stroke="{}" stroke-width="{}" stroke-linejoin="round"/>"#,
            path.join(" "),
            fill,
            series.color,
            style.line_width
        ));

        for (point, (x, y)) in series.points.iter().zip(&vertices) {
            svg_parts.push(format!(
                r#"<circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}"><title>{}: {} = {}</title></circle>"#,
                x,
                y,
                style.marker_size as f64 / 2.0,
                series.color,
                xml_escape(&series.name),
                xml_escape(&point.metric),
                format_value(point.value)
            ));

            if chart.text_labels {
                svg_parts.push(format!(
                    r#"<text x="{:.2}" y="{:.2}" class="value" fill="{}" text-anchor="middle">{}</text>"#,
                    x,
                    y - style.marker_size as f64 / 2.0 - 4.0,
                    series.color,
                    format_value(point.value)
                ));
            }
        }
        svg_parts.push("</g>".to_string());
    }

    svg_parts.extend(legend(chart, style));
    svg_parts.push("</svg>".to_string());

    Ok(svg_parts.join("\n"))
}


/// Horizontal legend centered below the plot.
fn legend(chart: &Chart, style: &ChartStyle) -> Vec<String> {
    let font = style.label_font_size as f64;
    let widths: Vec<f64> = chart
        .series
        .iter()
        .map(|s| SWATCH_WIDTH + 6.0 + text_width(&s.name, font))
        .collect();
    let total: f64 = widths.iter().sum::<f64>() + LEGEND_GAP * widths.len().saturating_sub(1) as f64;

    let y = style.height as f64 - CHART_MARGINS.3 as f64 / 2.0;
    let mut x = (style.width as f64 - total) / 2.0;
    let mut parts = Vec::new();

    for (series, width) in chart.series.iter().zip(&widths) {
        parts.push(format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"/>"#,
            x,
            y,
            x + SWATCH_WIDTH,
            y,
            series.color,
            style.line_width
        ));
        parts.push(format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}"/>"#,
            x + SWATCH_WIDTH / 2.0,
            y,
            style.marker_size as f64 / 2.0,
            series.color
        ));
        parts.push(format!(
            r#"<text x="{:.2}" y="{:.2}" class="legend-text">{}</text>"#,
            x + SWATCH_WIDTH + 6.0,
            y + font / 3.0,
            xml_escape(&series.name)
        ));
        x += width + LEGEND_GAP;
    }

    parts
}


/// Text anchor and vertical shift for a category label at `angle`.
fn label_anchor(angle: f64, font_size: f64) -> (&'static str, f64) {
    let (cos, sin) = (angle.cos(), angle.sin());

    let anchor = if cos > 0.1 {
        "start"
    } else if cos < -0.1 {
        "end"
    } else {
        "middle"
    };

    let shift = if sin > 0.1 {
        0.0
    } else if sin < -0.1 {
        font_size
    } else {
        font_size / 3.0
    };

    (anchor, shift)
}


/// Rough rendered width of `text` at `font_size`.
fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * 0.6
}


/// Evenly spaced round tick values covering `[min, max]`.
pub fn nice_ticks(min: f64, max: f64) -> Vec<f64> {
    let span = max - min;
    if !span.is_finite() || span <= 0.0 {
        return Vec::new();
    }

    let raw = span / TARGET_TICKS;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = match raw / magnitude {
        n if n <= 1.0 => magnitude,
        n if n <= 2.0 => 2.0 * magnitude,
        n if n <= 5.0 => 5.0 * magnitude,
        _ => 10.0 * magnitude,
    };

    let first = (min / step).ceil() as i64;
    let last = (max / step + 1e-9).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}


/// Compact number label: at most two decimals, no trailing zeros.
pub fn format_value(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}


/// Escape text for use inside SVG markup.
pub fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AxisRange, Series, SeriesPoint};

    fn chart() -> Chart {
        let series = |name: &str, color: &str, values: [f64; 2]| Series {
            name: name.to_string(),
            color: color.to_string(),
            points: vec![
                SeriesPoint { metric: "Speed".into(), value: values[0] },
                SeriesPoint { metric: "Reliability".into(), value: values[1] },
            ],
            matched_rows: 1,
        };

        Chart {
            metrics: vec!["Speed".into(), "Reliability".into()],
            series: vec![
                series("A", "#1f77b4", [8.0, 9.0]),
                series("B & <Co>", "#ff7f0e", [7.0, 8.0]),
            ],
            axis: AxisRange::new(0.0, 9.9),
            skipped: vec![],
            text_labels: true,
        }
    }

    #[test]
    fn test_svg_structure() {
        let svg = render_svg(&chart(), &ChartStyle::default()).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches(r#"<g class="trace">"#).count(), 2);
        assert!(svg.contains("rgba(31, 119, 180, 0.2)"));
        assert!(svg.contains("rgba(255, 127, 14, 0.2)"));
        assert!(svg.contains(">Speed</text>"));
        assert!(svg.contains(">Reliability</text>"));
    }

    #[test]
    fn test_svg_escapes_names() {
        let svg = render_svg(&chart(), &ChartStyle::default()).unwrap();
        assert!(svg.contains("B &amp; &lt;Co&gt;"));
        assert!(!svg.contains("<Co>"));
    }

    #[test]
    fn test_value_labels_toggle() {
        let mut chart = chart();
        let with_labels = render_svg(&chart, &ChartStyle::default()).unwrap();
        assert_eq!(with_labels.matches(r#"class="value""#).count(), 4);

        chart.text_labels = false;
        let without = render_svg(&chart, &ChartStyle::default()).unwrap();
        assert_eq!(without.matches(r#"class="value""#).count(), 0);
    }

    #[test]
    fn test_title_rendered_when_set() {
        let mut style = ChartStyle::default();
        style.title = Some("Team \"ratings\"".into());
        let svg = render_svg(&chart(), &style).unwrap();
        assert!(svg.contains("Team &quot;ratings&quot;"));
    }

    #[test]
    fn test_points_stay_inside_plot() {
        let style = ChartStyle::default();
        let frame = Frame::new(&style);
        let mut chart = chart();
        chart.series[0].points[0].value = 1000.0;

        let svg = render_svg(&chart, &style).unwrap();
        let (x, y) = frame.point(Frame::angle(0, 2), 1.0);
        assert!(svg.contains(&format!(r#"cx="{:.2}" cy="{:.2}""#, x, y)));
    }

    #[test]
    fn test_first_axis_points_up() {
        let frame = Frame::new(&ChartStyle::default());
        let (x, y) = frame.point(Frame::angle(0, 5), 1.0);
        assert!((x - frame.cx).abs() < 1e-9);
        assert!(y < frame.cy);
    }

    #[test]
    fn test_nice_ticks() {
        assert_eq!(nice_ticks(0.0, 100.0), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(nice_ticks(0.0, 9.9), vec![0.0, 2.0, 4.0, 6.0, 8.0]);
        assert!(nice_ticks(0.0, 0.0).is_empty());
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(8.0), "8");
        assert_eq!(format_value(8.5), "8.5");
        assert_eq!(format_value(1.0 / 3.0), "0.33");
        assert_eq!(format_value(-0.001), "0");
        assert_eq!(format_value(120.0), "120");
    }

    #[test]
    fn test_invalid_color_is_error() {
        let mut chart = chart();
        chart.series[0].color = "blue".into();
        assert!(render_svg(&chart, &ChartStyle::default()).is_err());
    }
}
