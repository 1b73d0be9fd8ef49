//! Transform from a table selection to radar chart geometry.

mod error;
mod series;

pub use error::TransformError;
pub use series::{build_chart, resolve_selection};
