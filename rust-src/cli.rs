//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::commands;


/// radar - compare spreadsheet rows on a radar chart
#[derive(Parser)]
#[command(name = "radar")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}


#[derive(Subcommand)]
enum Commands {
    /// List numeric and textual columns and the entities of a label column
    Columns {
        /// CSV, TSV or spreadsheet file
        file: PathBuf,

        /// Sheet name or zero-based index (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Label column to list entities for (default: first textual column)
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Render a radar chart as SVG, PNG or JSON
    Render(RenderArgs),

    /// Explore a table interactively in the terminal
    View {
        /// CSV, TSV or spreadsheet file
        file: PathBuf,

        /// Sheet name or zero-based index (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Initial label column (default: first textual column)
        #[arg(short, long)]
        label: Option<String>,

        /// Config file (default: ~/.radar-compare/config.json)
        #[arg(long, env = "RADAR_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Show or create the configuration file
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,

        /// Print the configuration file path only
        #[arg(long)]
        path: bool,

        /// Config file (default: ~/.radar-compare/config.json)
        #[arg(long, env = "RADAR_CONFIG")]
        config: Option<PathBuf>,
    },
}


#[derive(Debug, Args)]
pub struct RenderArgs {
    /// CSV, TSV or spreadsheet file
    pub file: PathBuf,

    /// Sheet name or zero-based index (default: first sheet)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Label column identifying entities (default: first textual column)
    #[arg(short, long)]
    pub label: Option<String>,

    /// Metric column, repeat for each axis in order (default: first numeric columns)
    #[arg(short = 'm', long = "metric")]
    pub metrics: Vec<String>,

    /// Label value to compare, repeat in legend order (default: first values)
    #[arg(short = 'e', long = "entity")]
    pub entities: Vec<String>,

    /// Output format (default: from the output extension, else svg)
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Open file after export
    #[arg(long)]
    pub open: bool,

    /// Print the rows behind the chart
    #[arg(long)]
    pub rows: bool,

    /// Config file (default: ~/.radar-compare/config.json)
    #[arg(long, env = "RADAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Radial axis policy
    #[arg(long, value_enum)]
    pub axis: Option<AxisArg>,

    /// Headroom factor for the dynamic axis
    #[arg(long)]
    pub headroom: Option<f64>,

    /// Upper bound of a fixed axis (implies --axis fixed)
    #[arg(long)]
    pub range_max: Option<f64>,

    /// What to do when several rows share a label value
    #[arg(long, value_enum)]
    pub multi_row: Option<MultiRowArg>,

    /// What to do when an entity matches no row
    #[arg(long, value_enum)]
    pub on_missing: Option<MissingArg>,

    /// Hide the value label on each point
    #[arg(long)]
    pub no_text: bool,

    /// Chart title
    #[arg(long)]
    pub title: Option<String>,

    /// Category label font size (10-24)
    #[arg(long)]
    pub label_font_size: Option<u32>,

    /// Value label font size (8-20)
    #[arg(long)]
    pub value_font_size: Option<u32>,

    /// Trace line width (1-5)
    #[arg(long)]
    pub line_width: Option<u32>,

    /// Marker size (4-12)
    #[arg(long)]
    pub marker_size: Option<u32>,

    /// Fill opacity (0.0-1.0)
    #[arg(long)]
    pub fill_opacity: Option<f64>,

    /// Chart width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Chart height in pixels
    #[arg(long)]
    pub height: Option<u32>,
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Svg,
    Png,
    Json,
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AxisArg {
    Dynamic,
    Fixed,
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MultiRowArg {
    First,
    Flatten,
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MissingArg {
    Skip,
    Fail,
}


/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Columns { file, sheet, label }) => {
            commands::columns::run(&file, sheet.as_deref(), label.as_deref())?;
        }
        Some(Commands::Render(args)) => {
            commands::render::run(args)?;
        }
        Some(Commands::View { file, sheet, label, config }) => {
            commands::view::run(&file, sheet.as_deref(), label.as_deref(), config.as_deref())?;
        }
        Some(Commands::Config { init, path, config }) => {
            commands::config::run(init, path, config.as_deref())?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
