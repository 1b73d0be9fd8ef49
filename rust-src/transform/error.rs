//! Errors raised while turning a selection into chart geometry.

use thiserror::Error;


#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("no metrics selected")]
    EmptyMetrics,

    #[error("no entities selected")]
    EmptyEntities,

    #[error("palette has no colors")]
    EmptyPalette,

    #[error("table has no columns")]
    NoColumns,

    #[error("column {0:?} not found")]
    UnknownColumn(String),

    #[error("column {0:?} is not numeric")]
    NotNumeric(String),

    #[error("no row has {column} = {value:?}")]
    EntityNotFound { column: String, value: String },

    #[error("{metric:?} is not numeric for {entity:?} at data row {row} (found {found:?})")]
    NonNumericValue {
        entity: String,
        metric: String,
        row: usize,
        found: String,
    },
}


impl TransformError {
    /// Incomplete selections are prompts for the user, not failures.
    pub fn is_selection_error(&self) -> bool {
        matches!(self, TransformError::EmptyMetrics | TransformError::EmptyEntities)
    }
}
