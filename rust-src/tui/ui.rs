//! Drawing of the interactive view.

use std::f64::consts::PI;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::Chart;
use crate::visualization::{format_value, hex_to_rgb, nice_ticks};

use super::app::{App, Panel, Slider, View};


const SIDEBAR_WIDTH: u16 = 34;
const FOCUS_COLOR: Color = Color::Yellow;
const GRID_COLOR: Color = Color::DarkGray;
const HELP: &str = "Tab panel  ↑↓ move  Space toggle  ←→ adjust  a axis  f duplicates  t labels  e export  q quit";


pub fn draw(frame: &mut Frame, app: &App, view: &View) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(frame.area());

    draw_sidebar(frame, app, columns[0]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3), Constraint::Length(2)])
        .split(columns[1]);

    match view {
        View::Chart(chart) => {
            draw_chart(frame, chart, main[0]);
            draw_legend(frame, chart, main[1]);
        }
        View::Prompt(msg) => draw_message(frame, msg, Color::Cyan, main[0]),
        View::Error(msg) => draw_message(frame, msg, Color::Red, main[0]),
    }

    draw_status(frame, app, main[2]);
}


fn draw_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Percentage(40),
            Constraint::Min(4),
            Constraint::Length(Slider::ALL.len() as u16 + 2),
        ])
        .split(area);

    let label_items: Vec<ListItem> = app
        .options(Panel::Label)
        .into_iter()
        .map(|name| {
            let marker = if name == app.label_column() { "(•)" } else { "( )" };
            ListItem::new(format!("{} {}", marker, name))
        })
        .collect();
    draw_list(frame, app, Panel::Label, " Label column ", label_items, rows[0]);

    let metric_items = checklist(app.options(Panel::Metrics), app.selected_metrics());
    draw_list(frame, app, Panel::Metrics, " Metrics ", metric_items, rows[1]);

    let entity_items = checklist(app.options(Panel::Entities), app.selected_entities());
    draw_list(frame, app, Panel::Entities, " Entities ", entity_items, rows[2]);

    let style_items: Vec<ListItem> = Slider::ALL
        .iter()
        .map(|slider| ListItem::new(format!("{:<13} ◂ {:>4} ▸", slider.name(), app.slider_value(*slider))))
        .collect();
    draw_list(frame, app, Panel::Style, " Style ", style_items, rows[3]);
}


/// Items with their selection position, e.g. `[2] Speed`.
fn checklist(options: Vec<String>, selected: &[String]) -> Vec<ListItem<'static>> {
    options
        .into_iter()
        .map(|name| match selected.iter().position(|s| *s == name) {
            Some(pos) => ListItem::new(format!("[{}] {}", pos + 1, name))
                .style(Style::default().add_modifier(Modifier::BOLD)),
            None => ListItem::new(format!("[ ] {}", name)),
        })
        .collect()
}


fn draw_list(frame: &mut Frame, app: &App, panel: Panel, title: &str, items: Vec<ListItem>, area: Rect) {
    let focused = app.focus() == panel;
    let border = if focused {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(Block::bordered().title(title.to_string()).border_style(border))
        .highlight_style(if focused {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        });

    let mut state = ListState::default();
    state.select(Some(app.cursor(panel)));
    frame.render_stateful_widget(list, area, &mut state);
}


fn draw_chart(frame: &mut Frame, chart: &Chart, area: Rect) {
    // Terminal cells are about twice as tall as they are wide
    let aspect = area.width.max(1) as f64 / (area.height.max(1) as f64 * 2.0);
    let (x_extent, y_extent) = if aspect >= 1.0 {
        (1.35 * aspect, 1.35)
    } else {
        (1.35, 1.35 / aspect)
    };

    let count = chart.metrics.len().max(1);
    let angle = |idx: usize| PI / 2.0 + 2.0 * PI * idx as f64 / count as f64;
    let span = chart.axis.span();

    let canvas = Canvas::default()
        .block(Block::bordered().title(format!(" Radar · axis 0–{} ", format_value(chart.axis.max))))
        .marker(Marker::Braille)
        .x_bounds([-x_extent, x_extent])
        .y_bounds([-y_extent, y_extent])
        .paint(|ctx| {
            for tick in nice_ticks(chart.axis.min, chart.axis.max) {
                let radius = if span > 0.0 { (tick - chart.axis.min) / span } else { 0.0 };
                if radius > 0.0 {
                    ctx.draw(&Circle { x: 0.0, y: 0.0, radius, color: GRID_COLOR });
                }
            }
            ctx.draw(&Circle { x: 0.0, y: 0.0, radius: 1.0, color: GRID_COLOR });

            for (idx, metric) in chart.metrics.iter().enumerate() {
                let a = angle(idx);
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2: a.cos(),
                    y2: a.sin(),
                    color: GRID_COLOR,
                });
                let label_x = 1.12 * a.cos() - if a.cos() < -0.1 { 0.08 * metric.len() as f64 } else { 0.0 };
                ctx.print(
                    label_x,
                    1.12 * a.sin(),
                    Span::styled(metric.clone(), Style::default().add_modifier(Modifier::BOLD)),
                );
            }

            ctx.layer();

            for series in &chart.series {
                let color = terminal_color(&series.color);
                let vertices: Vec<(f64, f64)> = series
                    .points
                    .iter()
                    .map(|p| {
                        let a = angle(chart.metric_index(&p.metric).unwrap_or(0));
                        let r = chart.axis.fraction(p.value);
                        (r * a.cos(), r * a.sin())
                    })
                    .collect();

                for (i, &(x1, y1)) in vertices.iter().enumerate() {
                    let (x2, y2) = vertices[(i + 1) % vertices.len()];
                    ctx.draw(&CanvasLine { x1, y1, x2, y2, color });
                }

                if chart.text_labels {
                    for (point, &(x, y)) in series.points.iter().zip(&vertices) {
                        ctx.print(x, y, Span::styled(format_value(point.value), Style::default().fg(color)));
                    }
                }
            }
        });

    frame.render_widget(canvas, area);
}


fn draw_legend(frame: &mut Frame, chart: &Chart, area: Rect) {
    let mut spans = Vec::new();
    for series in &chart.series {
        spans.push(Span::styled("━━ ", Style::default().fg(terminal_color(&series.color))));
        spans.push(Span::raw(format!("{}   ", series.name)));
    }

    let legend = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::bordered().title(" Legend "));
    frame.render_widget(legend, area);
}


fn draw_message(frame: &mut Frame, msg: &str, color: Color, area: Rect) {
    let paragraph = Paragraph::new(msg.to_string())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::bordered().title(" Radar "));
    frame.render_widget(paragraph, area);
}


fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let config = app.config();
    let mut lines = vec![Line::from(Span::styled(HELP, Style::default().fg(Color::DarkGray)))];

    let summary = format!(
        "axis: {} · duplicates: {} · rows: {}",
        config.axis_range.name(),
        config.multi_row.name(),
        app.table().row_count()
    );
    let status = match app.status() {
        Some(msg) => format!("{} · {}", msg, summary),
        None => summary,
    };
    lines.push(Line::from(status));

    frame.render_widget(Paragraph::new(lines), area);
}


fn terminal_color(hex: &str) -> Color {
    match hex_to_rgb(hex) {
        Ok((r, g, b)) => Color::Rgb(r, g, b),
        Err(_) => Color::White,
    }
}
