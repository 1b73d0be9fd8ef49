//! radar - compare spreadsheet rows on a radar chart.
//!
//! Reads CSV, TSV and spreadsheet files and draws the selected rows
//! as overlaid radar traces, either to a file or in the terminal.

mod cli;
mod commands;
mod config;
mod data;
mod models;
mod transform;
mod tui;
mod visualization;


fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    if let Err(e) = cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
