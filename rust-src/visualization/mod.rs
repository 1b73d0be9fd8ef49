//! Visualization layer: SVG radar charts, file export and terminal tables.

mod color;
mod export;
mod radar;
mod table_view;

#[allow(unused_imports)]
pub use color::{hex_to_rgb, hex_to_rgba, ColorError};
pub use export::{default_export_path, export_chart, open_file, ExportFormat};
#[allow(unused_imports)]
pub use radar::{format_value, nice_ticks, render_svg};
pub use table_view::render_rows_table;
