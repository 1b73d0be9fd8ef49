//! Columns command - show what a table offers for charting.

use std::path::Path;

use anyhow::{bail, Result};

use crate::data::read_table;


const MAX_LISTED_VALUES: usize = 20;


/// Run the columns command.
pub fn run(file: &Path, sheet: Option<&str>, label: Option<&str>) -> Result<()> {
    let table = read_table(file, sheet)?;

    println!("\n{}", "=".repeat(60));
    println!("{:^60}", file.display().to_string());
    println!("{}\n", "=".repeat(60));

    println!("  Rows:                {:>15}", table.row_count());
    println!("  Columns:             {:>15}", table.columns().len());

    let numeric = table.numeric_columns();
    println!("\nNUMERIC COLUMNS ({})", numeric.len());
    println!("{}", "-".repeat(40));
    if numeric.is_empty() {
        println!("  \x1b[2m(none)\x1b[0m");
    }
    for name in &numeric {
        println!("  {}", name);
    }

    let textual = table.textual_columns();
    println!("\nTEXTUAL COLUMNS ({})", textual.len());
    println!("{}", "-".repeat(40));
    if textual.is_empty() {
        println!("  \x1b[2m(none)\x1b[0m");
    }
    for name in &textual {
        println!("  {}", name);
    }

    let label_column = match label {
        Some(name) => {
            if table.column_index(name).is_none() {
                bail!("Unknown column: {}", name);
            }
            name
        }
        None => match table.default_label_column() {
            Some(name) => name,
            None => return Ok(()),
        },
    };

    let values = table.distinct_values(label_column);
    println!("\nENTITIES IN {} ({})", label_column.to_uppercase(), values.len());
    println!("{}", "-".repeat(40));
    for value in values.iter().take(MAX_LISTED_VALUES) {
        println!("  {}", value);
    }
    if values.len() > MAX_LISTED_VALUES {
        println!("  \x1b[2m... and {} more\x1b[0m", values.len() - MAX_LISTED_VALUES);
    }
    println!();

    Ok(())
}
