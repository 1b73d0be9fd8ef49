//! Readers turning CSV files and spreadsheets into a [`Table`].

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};

use crate::models::{Cell, Table};


/// Read a table from a CSV/TSV file or a spreadsheet workbook.
///
/// For workbooks `sheet` is a sheet name or zero-based index; the first sheet
/// is used when it is `None`. The first row is always the header.
pub fn read_table(path: &Path, sheet: Option<&str>) -> Result<Table> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let table = match extension.as_str() {
        "csv" => read_delimited(path, b',')?,
        "tsv" | "tab" => read_delimited(path, b'\t')?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path, sheet)?,
        "" => bail!("Cannot tell the file type of {} (no extension)", path.display()),
        other => bail!("Unsupported file type .{} for {}", other, path.display()),
    };

    log::debug!(
        "read {} rows x {} columns from {}",
        table.row_count(),
        table.columns().len(),
        path.display()
    );

    Ok(table)
}


/// Read a delimited text file.
fn read_delimited(path: &Path, delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("Failed to read header row of {}", path.display()))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    if headers.iter().all(|h| h.trim().is_empty()) {
        bail!("{} has no header row", path.display());
    }

    let mut rows = Vec::new();
    for (line_num, record) in reader.records().enumerate() {
        let record = record.with_context(|| {
            format!("Malformed row {} in {}", line_num + 2, path.display())
        })?;
        rows.push(record.iter().map(parse_text_cell).collect());
    }

    Ok(Table::new(headers, rows))
}


/// Read one worksheet of a workbook.
fn read_workbook(path: &Path, sheet: Option<&str>) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| anyhow!("Failed to open workbook {}: {}", path.display(), e))?;

    let sheet_names = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        bail!("{} has no worksheets", path.display());
    }

    let range = match sheet {
        Some(sel) => match sel.parse::<usize>() {
            Ok(idx) => workbook
                .worksheet_range_at(idx)
                .ok_or_else(|| anyhow!("No sheet at index {} in {}", idx, path.display()))?
                .map_err(|e| anyhow!("Failed to read sheet {}: {}", idx, e))?,
            Err(_) => workbook
                .worksheet_range(sel)
                .map_err(|e| anyhow!("Failed to read sheet {:?}: {}", sel, e))?,
        },
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| anyhow!("No first sheet in {}", path.display()))?
            .map_err(|e| anyhow!("Failed to read sheet {:?}: {}", sheet_names[0], e))?,
    };

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(|c| c.to_string()).collect(),
        None => bail!("Sheet in {} is empty", path.display()),
    };

    let rows = rows
        .map(|row| row.iter().map(spreadsheet_cell).collect())
        .collect();

    Ok(Table::new(headers, rows))
}


/// Classify a text cell: blank, finite number, or text.
pub fn parse_text_cell(raw: &str) -> Cell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Cell::Empty;
    }

    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Cell::Number(n),
        _ => Cell::Text(trimmed.to_string()),
    }
}


fn spreadsheet_cell(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) if f.is_finite() => Cell::Number(*f),
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.trim().to_string()),
        Data::Empty => Cell::Empty,
        other => Cell::Text(other.to_string()),
    }
}
