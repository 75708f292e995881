use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Solrack CLI - GB 50009-2012 loads and steel profile selection for PV mounting racks."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a file in addition to stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Design a rack from a TOML or JSON input file.
    Design(DesignArgs),
    /// Print the bundled code tables as TOML (a starting point for --tables).
    Tables(TablesArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable calculation sheet
    #[default]
    Text,
    /// Report envelope as pretty JSON
    Json,
}

/// Arguments for the `design` subcommand.
#[derive(Args, Debug)]
pub struct DesignArgs {
    /// Path to the rack input file (.toml or .json).
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    /// Substitute code tables in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub tables: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Override the safety threshold from the input file.
    #[arg(long, value_name = "FLOAT")]
    pub safety_threshold: Option<f64>,

    /// Override the rack count from the input file.
    #[arg(long, value_name = "INT", allow_negative_numbers = true)]
    pub rack_count: Option<i64>,

    /// Use the height-dependent gust factor instead of the tables' model.
    #[arg(long)]
    pub gust_by_height: bool,
}

/// Arguments for the `tables` subcommand.
#[derive(Args, Debug)]
pub struct TablesArgs {
    /// Write the tables to a file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
