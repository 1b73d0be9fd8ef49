//! Data access layer for uploaded tables.

mod table_reader;

#[allow(unused_imports)]
pub use table_reader::{parse_text_cell, read_table};
