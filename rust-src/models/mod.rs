//! Table and chart models.

mod chart;
mod table;

pub use chart::{AxisRange, Chart, Selection, Series, SeriesPoint};
pub use table::{Cell, Column, ColumnKind, Table};
