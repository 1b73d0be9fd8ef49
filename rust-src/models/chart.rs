//! Selection input and chart geometry output of the transform.

use serde::{Deserialize, Serialize};


/// What the user picked: a label column, ordered metrics, ordered entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub label_column: String,
    pub metrics: Vec<String>,
    pub entities: Vec<String>,
}


impl Selection {
    pub fn new(label_column: impl Into<String>, metrics: Vec<String>, entities: Vec<String>) -> Self {
        Self {
            label_column: label_column.into(),
            metrics,
            entities,
        }
    }

    /// Both metric and entity lists are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.metrics.is_empty() && !self.entities.is_empty()
    }
}


/// One vertex of a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub metric: String,
    pub value: f64,
}


/// Polar trace for one entity.
///
/// The point list is open: the renderer joins the last point back to the first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub color: String,
    pub points: Vec<SeriesPoint>,
    pub matched_rows: usize,
}


impl Series {
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn max_value(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::max)
    }
}


/// Shared radial scale of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}


impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `value` within the range, clamped to `0.0..=1.0`.
    pub fn fraction(&self, value: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}


/// Everything a renderer needs to draw one radar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub metrics: Vec<String>,
    pub series: Vec<Series>,
    pub axis: AxisRange,
    pub skipped: Vec<String>,
    pub text_labels: bool,
}


impl Chart {
    pub fn metric_index(&self, metric: &str) -> Option<usize> {
        self.metrics.iter().position(|m| m == metric)
    }
}
