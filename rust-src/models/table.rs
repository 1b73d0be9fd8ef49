//! In-memory table model produced by the readers.

use std::collections::HashSet;
use std::fmt;


/// A single parsed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}


impl Cell {
    /// Numeric value, if this cell holds one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}


impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Empty => Ok(()),
        }
    }
}


/// Whether a column holds numbers or free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Textual,
}


#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}


/// Rows of cells under a header, with each column classified once at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
}


impl Table {
    /// Build a table from raw header names and rows.
    ///
    /// Blank headers become `column_<n>`, repeated headers get a `.1`, `.2`
    /// suffix, and every row is padded or cut to the header width.
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<Cell>>) -> Self {
        let names = normalize_headers(headers);
        let width = names.len();

        for row in &mut rows {
            row.resize(width, Cell::Empty);
        }

        let columns = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| Column {
                kind: infer_kind(rows.iter().map(|row| &row[idx])),
                name,
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Names of numeric columns, in table order.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns_of_kind(ColumnKind::Numeric)
    }

    /// Names of textual columns, in table order.
    pub fn textual_columns(&self) -> Vec<&str> {
        self.columns_of_kind(ColumnKind::Textual)
    }

    pub fn is_numeric(&self, name: &str) -> bool {
        self.columns
            .iter()
            .any(|c| c.name == name && c.kind == ColumnKind::Numeric)
    }

    /// Distinct non-empty values of a column, in order of first appearance.
    pub fn distinct_values(&self, column: &str) -> Vec<String> {
        let Some(idx) = self.column_index(column) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut values = Vec::new();

        for row in &self.rows {
            let cell = &row[idx];
            if cell.is_empty() {
                continue;
            }
            let value = cell.to_string();
            if seen.insert(value.clone()) {
                values.push(value);
            }
        }

        values
    }

    /// First textual column, falling back to the first column of any kind.
    pub fn default_label_column(&self) -> Option<&str> {
        self.textual_columns()
            .first()
            .copied()
            .or_else(|| self.columns.first().map(|c| c.name.as_str()))
    }

    fn columns_of_kind(&self, kind: ColumnKind) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.name.as_str())
            .collect()
    }
}


fn normalize_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(headers.len());

    for (idx, header) in headers.into_iter().enumerate() {
        let base = match header.trim() {
            "" => format!("column_{}", idx + 1),
            trimmed => trimmed.to_string(),
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }

        seen.insert(name.clone());
        names.push(name);
    }

    names
}


fn infer_kind<'a>(cells: impl Iterator<Item = &'a Cell>) -> ColumnKind {
    let mut saw_number = false;

    for cell in cells {
        match cell {
            Cell::Number(_) => saw_number = true,
            Cell::Text(_) => return ColumnKind::Textual,
            Cell::Empty => {}
        }
    }

    if saw_number {
        ColumnKind::Numeric
    } else {
        ColumnKind::Textual
    }
}
