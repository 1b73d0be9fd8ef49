//! Interactive session state and key handling.

use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::{
    AxisRangePolicy,
    MultiRowPolicy,
    RadarConfig,
    FILL_OPACITY_RANGE,
    LABEL_FONT_SIZE_RANGE,
    LINE_WIDTH_RANGE,
    MARKER_SIZE_RANGE,
    VALUE_FONT_SIZE_RANGE,
};
use crate::models::{Chart, Selection, Table};
use crate::transform::{build_chart, resolve_selection};
use crate::visualization::{default_export_path, export_chart, ExportFormat};


/// Sidebar panel with keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Label,
    Metrics,
    Entities,
    Style,
}


impl Panel {
    const ALL: [Panel; 4] = [Panel::Label, Panel::Metrics, Panel::Entities, Panel::Style];

    fn index(self) -> usize {
        Panel::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Panel::ALL[(self.index() + 1) % Panel::ALL.len()]
    }

    fn prev(self) -> Self {
        Panel::ALL[(self.index() + Panel::ALL.len() - 1) % Panel::ALL.len()]
    }
}


/// Cosmetic slider in the style panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slider {
    LabelFontSize,
    ValueFontSize,
    LineWidth,
    MarkerSize,
    FillOpacity,
}


impl Slider {
    pub const ALL: [Slider; 5] = [
        Slider::LabelFontSize,
        Slider::ValueFontSize,
        Slider::LineWidth,
        Slider::MarkerSize,
        Slider::FillOpacity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Slider::LabelFontSize => "Label font",
            Slider::ValueFontSize => "Value font",
            Slider::LineWidth => "Line width",
            Slider::MarkerSize => "Marker size",
            Slider::FillOpacity => "Fill opacity",
        }
    }
}


/// What the chart area shows for the current control state.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Chart(Chart),
    Prompt(String),
    Error(String),
}


pub struct App {
    table: Table,
    config: RadarConfig,
    label_column: String,
    metrics: Vec<String>,
    entities: Vec<String>,
    focus: Panel,
    cursors: [usize; 4],
    status: Option<String>,
    export_dir: PathBuf,
    /// Axis policy the `a` key switches to; keeps loaded values across toggles.
    alternate_axis: AxisRangePolicy,
    pub should_quit: bool,
}


impl App {
    pub fn new(table: Table, config: RadarConfig, label: Option<&str>, export_dir: PathBuf) -> Result<Self> {
        let selection = resolve_selection(&table, label, &[], &[], &config)?;
        let alternate_axis = match config.axis_range {
            AxisRangePolicy::DynamicMax { .. } => AxisRangePolicy::fixed_default(),
            AxisRangePolicy::Fixed { .. } => AxisRangePolicy::default(),
        };

        Ok(Self {
            table,
            config,
            label_column: selection.label_column,
            metrics: selection.metrics,
            entities: selection.entities,
            focus: Panel::Metrics,
            cursors: [0; 4],
            status: None,
            export_dir,
            alternate_axis,
            should_quit: false,
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn config(&self) -> &RadarConfig {
        &self.config
    }

    pub fn focus(&self) -> Panel {
        self.focus
    }

    pub fn cursor(&self, panel: Panel) -> usize {
        self.cursors[panel.index()]
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    pub fn selected_metrics(&self) -> &[String] {
        &self.metrics
    }

    pub fn selected_entities(&self) -> &[String] {
        &self.entities
    }

    /// Choices offered by a panel, in display order.
    pub fn options(&self, panel: Panel) -> Vec<String> {
        match panel {
            Panel::Label => self.table.column_names().into_iter().map(String::from).collect(),
            Panel::Metrics => self
                .table
                .numeric_columns()
                .into_iter()
                .filter(|name| *name != self.label_column)
                .map(String::from)
                .collect(),
            Panel::Entities => self.table.distinct_values(&self.label_column),
            Panel::Style => Slider::ALL.iter().map(|s| s.name().to_string()).collect(),
        }
    }

    pub fn selection(&self) -> Selection {
        Selection::new(self.label_column.clone(), self.metrics.clone(), self.entities.clone())
    }

    /// Recompute the chart from scratch for the current state.
    pub fn view(&self) -> View {
        let selection = self.selection();
        if !selection.is_complete() {
            return View::Prompt("Select at least one metric and one entity.".to_string());
        }

        match build_chart(&self.table, &selection, &self.config) {
            Ok(chart) if chart.series.is_empty() => {
                View::Prompt("None of the selected entities match a row.".to_string())
            }
            Ok(chart) => View::Chart(chart),
            Err(e) => View::Error(e.to_string()),
        }
    }

    /// Display value of a style slider.
    pub fn slider_value(&self, slider: Slider) -> String {
        let style = &self.config.style;
        match slider {
            Slider::LabelFontSize => style.label_font_size.to_string(),
            Slider::ValueFontSize => style.value_font_size.to_string(),
            Slider::LineWidth => style.line_width.to_string(),
            Slider::MarkerSize => style.marker_size.to_string(),
            Slider::FillOpacity => format!("{:.2}", style.fill_opacity),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle(),
            KeyCode::Left | KeyCode::Char('h') => self.adjust(-1),
            KeyCode::Right | KeyCode::Char('l') => self.adjust(1),
            KeyCode::Char('a') => self.toggle_axis_policy(),
            KeyCode::Char('f') => self.toggle_multi_row(),
            KeyCode::Char('t') => {
                self.config.text_labels = !self.config.text_labels;
                self.status = Some(format!(
                    "Value labels {}",
                    if self.config.text_labels { "on" } else { "off" }
                ));
            }
            KeyCode::Char('e') => self.export(),
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.options(self.focus).len();
        let cursor = &mut self.cursors[self.focus.index()];
        if len == 0 {
            *cursor = 0;
            return;
        }
        *cursor = (*cursor as isize + delta).clamp(0, len as isize - 1) as usize;
    }

    fn toggle(&mut self) {
        let options = self.options(self.focus);
        let Some(choice) = options.get(self.cursor(self.focus)).cloned() else {
            return;
        };

        match self.focus {
            Panel::Label => self.set_label_column(choice),
            Panel::Metrics => toggle_in_order(&mut self.metrics, choice),
            Panel::Entities => toggle_in_order(&mut self.entities, choice),
            Panel::Style => {}
        }
    }

    /// Switch label column; entity choices are reset to the defaults for it.
    fn set_label_column(&mut self, column: String) {
        if column == self.label_column {
            return;
        }

        self.metrics.retain(|m| *m != column);
        self.entities = self
            .table
            .distinct_values(&column)
            .into_iter()
            .take(self.config.default_entity_count)
            .collect();
        self.cursors[Panel::Entities.index()] = 0;
        self.cursors[Panel::Metrics.index()] = 0;
        self.status = Some(format!("Label column: {}", column));
        self.label_column = column;
    }

    fn adjust(&mut self, delta: i32) {
        if self.focus != Panel::Style {
            return;
        }

        let Some(&slider) = Slider::ALL.get(self.cursor(Panel::Style)) else {
            return;
        };

        let style = &mut self.config.style;
        match slider {
            Slider::LabelFontSize => step(&mut style.label_font_size, delta, &LABEL_FONT_SIZE_RANGE),
            Slider::ValueFontSize => step(&mut style.value_font_size, delta, &VALUE_FONT_SIZE_RANGE),
            Slider::LineWidth => step(&mut style.line_width, delta, &LINE_WIDTH_RANGE),
            Slider::MarkerSize => step(&mut style.marker_size, delta, &MARKER_SIZE_RANGE),
            Slider::FillOpacity => {
                let value = (style.fill_opacity + delta as f64 * 0.05).clamp(
                    *FILL_OPACITY_RANGE.start(),
                    *FILL_OPACITY_RANGE.end(),
                );
                style.fill_opacity = (value * 100.0).round() / 100.0;
            }
        }
    }

    fn toggle_axis_policy(&mut self) {
        std::mem::swap(&mut self.config.axis_range, &mut self.alternate_axis);
        self.status = Some(format!("Axis range: {}", self.config.axis_range.name()));
    }

    fn toggle_multi_row(&mut self) {
        self.config.multi_row = match self.config.multi_row {
            MultiRowPolicy::FirstMatch => MultiRowPolicy::FlattenAll,
            MultiRowPolicy::FlattenAll => MultiRowPolicy::FirstMatch,
        };
        self.status = Some(format!("Duplicate labels: {}", self.config.multi_row.name()));
    }

    fn export(&mut self) {
        let chart = match self.view() {
            View::Chart(chart) => chart,
            View::Prompt(msg) | View::Error(msg) => {
                self.status = Some(format!("Nothing to export: {}", msg));
                return;
            }
        };

        let path = default_export_path(&self.export_dir, ExportFormat::Svg);
        self.status = Some(
            match export_chart(&chart, &self.config.style, ExportFormat::Svg, &path) {
                Ok(()) => format!("Exported to {}", path.display()),
                Err(e) => format!("Export failed: {:#}", e),
            },
        );
    }
}


/// Add `choice` at the end of `selected`, or remove it if already there.
fn toggle_in_order(selected: &mut Vec<String>, choice: String) {
    if let Some(pos) = selected.iter().position(|s| *s == choice) {
        selected.remove(pos);
    } else {
        selected.push(choice);
    }
}


fn step(value: &mut u32, delta: i32, range: &std::ops::RangeInclusive<u32>) {
    let next = (*value as i64 + delta as i64).clamp(*range.start() as i64, *range.end() as i64);
    *value = next as u32;
}
