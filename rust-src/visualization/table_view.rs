//! Read-only terminal table of the rows behind a chart.

use crate::models::{Selection, Table};


const MAX_CELL_WIDTH: usize = 24;


/// Shorten text to `width` characters, marking the cut with an ellipsis.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}


/// Render the label and metric columns of every row that matches a chosen
/// entity, grouped by entity in selection order.
///
/// Columns that do not exist in the table are left out.
pub fn render_rows_table(table: &Table, selection: &Selection) -> String {
    let Some(label_idx) = table.column_index(&selection.label_column) else {
        return String::new();
    };

    let columns: Vec<(String, usize)> = std::iter::once((selection.label_column.clone(), label_idx))
        .chain(
            selection
                .metrics
                .iter()
                .filter_map(|m| table.column_index(m).map(|idx| (m.clone(), idx))),
        )
        .collect();

    let mut body: Vec<Vec<String>> = Vec::new();
    for entity in &selection.entities {
        for row in table.rows() {
            let cell = &row[label_idx];
            if cell.is_empty() || cell.to_string() != *entity {
                continue;
            }
            body.push(
                columns
                    .iter()
                    .map(|(_, idx)| truncate(&row[*idx].to_string(), MAX_CELL_WIDTH))
                    .collect(),
            );
        }
    }

    let headers: Vec<String> = columns
        .iter()
        .map(|(name, _)| truncate(name, MAX_CELL_WIDTH))
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            body.iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(mid), right)
    };

    let line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(col, (cell, w))| {
                let pad = " ".repeat(w - cell.chars().count());
                // Label column left aligned, metrics right aligned
                if col == 0 {
                    format!(" {}{} ", cell, pad)
                } else {
                    format!(" {}{} ", pad, cell)
                }
            })
            .collect();
        format!("│{}│", padded.join("│"))
    };

    let mut lines = vec![rule("┌", "┬", "┐"), line(&headers[..]), rule("├", "┼", "┤")];
    if body.is_empty() {
        let inner = widths.iter().map(|w| w + 3).sum::<usize>() - 1;
        lines.push(format!("│{:^inner$}│", "no matching rows", inner = inner));
    }
    for row in &body {
        lines.push(line(&row[..]));
    }
    lines.push(rule("└", "┴", "┘"));

    lines.join("\n")
}
