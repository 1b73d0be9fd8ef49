//! Selection-to-series transform.

use std::collections::HashSet;

use crate::config::{AxisRangePolicy, MissingEntityPolicy, MultiRowPolicy, RadarConfig};
use crate::models::{AxisRange, Cell, Chart, Selection, Series, SeriesPoint, Table};

use super::error::TransformError;


/// Fill in the parts of a selection the user left open.
///
/// Without a label column the first textual column is used. Empty metric or
/// entity lists take the first `default_metric_count` numeric columns (other
/// than the label column) and the first `default_entity_count` distinct
/// label values. Explicit lists keep their order, minus repeats.
pub fn resolve_selection(
    table: &Table,
    label_column: Option<&str>,
    metrics: &[String],
    entities: &[String],
    config: &RadarConfig,
) -> Result<Selection, TransformError> {
    let label = match label_column {
        Some(name) => {
            if table.column_index(name).is_none() {
                return Err(TransformError::UnknownColumn(name.to_string()));
            }
            name.to_string()
        }
        None => table
            .default_label_column()
            .ok_or(TransformError::NoColumns)?
            .to_string(),
    };

    let metrics = if metrics.is_empty() {
        table
            .numeric_columns()
            .into_iter()
            .filter(|name| *name != label)
            .take(config.default_metric_count)
            .map(String::from)
            .collect()
    } else {
        dedup(metrics)
    };

    let entities = if entities.is_empty() {
        table
            .distinct_values(&label)
            .into_iter()
            .take(config.default_entity_count)
            .collect()
    } else {
        dedup(entities)
    };

    Ok(Selection::new(label, metrics, entities))
}


/// Project the selected rows into one polar series per entity.
///
/// Pure and deterministic: the same table, selection and config always give
/// the same chart.
pub fn build_chart(
    table: &Table,
    selection: &Selection,
    config: &RadarConfig,
) -> Result<Chart, TransformError> {
    if selection.metrics.is_empty() {
        return Err(TransformError::EmptyMetrics);
    }
    if selection.entities.is_empty() {
        return Err(TransformError::EmptyEntities);
    }
    if config.palette.is_empty() {
        return Err(TransformError::EmptyPalette);
    }

    let label_idx = table
        .column_index(&selection.label_column)
        .ok_or_else(|| TransformError::UnknownColumn(selection.label_column.clone()))?;

    let metric_cols = selection
        .metrics
        .iter()
        .map(|metric| {
            let idx = table
                .column_index(metric)
                .ok_or_else(|| TransformError::UnknownColumn(metric.clone()))?;
            if !table.is_numeric(metric) {
                return Err(TransformError::NotNumeric(metric.clone()));
            }
            Ok((metric.as_str(), idx))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut axis = axis_range(table, &metric_cols, config.axis_range);
    let mut series = Vec::with_capacity(selection.entities.len());
    let mut skipped = Vec::new();

    for (index, entity) in selection.entities.iter().enumerate() {
        let matches = matching_rows(table, label_idx, entity);

        if matches.is_empty() {
            match config.missing_entity {
                MissingEntityPolicy::Skip => {
                    log::warn!(
                        "skipping {:?}: no row has {} = {:?}",
                        entity,
                        selection.label_column,
                        entity
                    );
                    skipped.push(entity.clone());
                    continue;
                }
                MissingEntityPolicy::Fail => {
                    return Err(TransformError::EntityNotFound {
                        column: selection.label_column.clone(),
                        value: entity.clone(),
                    });
                }
            }
        }

        let used_rows = match config.multi_row {
            MultiRowPolicy::FirstMatch => {
                if matches.len() > 1 {
                    log::debug!(
                        "{:?} matches {} rows, using the first",
                        entity,
                        matches.len()
                    );
                }
                &matches[..1]
            }
            MultiRowPolicy::FlattenAll => &matches[..],
        };

        let mut points = Vec::with_capacity(used_rows.len() * metric_cols.len());
        for &row_idx in used_rows {
            for &(metric, col_idx) in &metric_cols {
                let cell = &table.rows()[row_idx][col_idx];
                let value = cell.as_number().ok_or_else(|| TransformError::NonNumericValue {
                    entity: entity.clone(),
                    metric: metric.to_string(),
                    row: row_idx + 1,
                    found: cell.to_string(),
                })?;
                points.push(SeriesPoint {
                    metric: metric.to_string(),
                    value,
                });
            }
        }

        series.push(Series {
            name: entity.clone(),
            color: config.palette[index % config.palette.len()].clone(),
            points,
            matched_rows: matches.len(),
        });
    }

    if let Some(peak) = series.iter().filter_map(Series::max_value).reduce(f64::max) {
        if peak > axis.max {
            log::warn!(
                "data reaches {} beyond the fixed axis maximum {}, widening the axis",
                peak,
                axis.max
            );
            axis.max = peak;
        }
    }

    Ok(Chart {
        metrics: selection.metrics.clone(),
        series,
        axis,
        skipped,
        text_labels: config.text_labels,
    })
}


/// Radial range shared by every series of one render.
///
/// The dynamic policy looks at every row of the table, not just the chosen
/// entities, so switching entities never rescales the chart.
fn axis_range(table: &Table, metric_cols: &[(&str, usize)], policy: AxisRangePolicy) -> AxisRange {
    match policy {
        AxisRangePolicy::Fixed { min, max } => AxisRange::new(min, max),
        AxisRangePolicy::DynamicMax { headroom } => {
            let peak = table
                .rows()
                .iter()
                .flat_map(|row| metric_cols.iter().map(move |&(_, idx)| &row[idx]))
                .filter_map(Cell::as_number)
                .reduce(f64::max);

            match peak {
                Some(peak) if peak > 0.0 => AxisRange::new(0.0, peak * headroom),
                _ => AxisRange::new(0.0, 1.0),
            }
        }
    }
}


fn matching_rows(table: &Table, label_idx: usize, entity: &str) -> Vec<usize> {
    table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            let cell = &row[label_idx];
            !cell.is_empty() && cell.to_string() == entity
        })
        .map(|(idx, _)| idx)
        .collect()
}


fn dedup(values: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .iter()
        .filter(|v| seen.insert(v.as_str()))
        .cloned()
        .collect()
}
