//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tidy_model::ChartKind;
use tidy_transform::{Aggregation, GroupKey};

#[derive(Parser)]
#[command(
    name = "tidy",
    version,
    about = "Tidy Table Studio - clean and summarize messy CSV data",
    long_about = "Clean messy CSV files with a declarative rule pipeline.\n\n\
                  Repairs encoding artifacts, maps sentinel strings to null, \
                  truncates and casts columns, and summarizes the result."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags and RUST_LOG).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a cleaning pipeline over a CSV file or a directory of CSV files.
    Clean(CleanArgs),

    /// Show the shape, column types and null counts of a CSV file.
    Inspect(InspectArgs),

    /// Group a (cleaned) CSV file and chart one aggregated column.
    Summarize(SummarizeArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// CSV file or directory of CSV files.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Pipeline JSON file (default: $TIDY_PIPELINE).
    #[arg(long, short = 'p', value_name = "FILE")]
    pub pipeline: Option<PathBuf>,

    /// Output file (single input) or directory (default: <INPUT dir>/cleaned).
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Run the pipeline and report without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// CSV file to inspect.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Pipeline JSON file whose load options (and rules, with --clean) apply.
    #[arg(long, short = 'p', value_name = "FILE")]
    pub pipeline: Option<PathBuf>,

    /// Inspect the table after running the pipeline's rules.
    #[arg(long)]
    pub clean: bool,

    /// Show value counts for this column.
    #[arg(long, value_name = "NAME")]
    pub column: Option<String>,

    /// Rows of value counts to show.
    #[arg(long, default_value_t = 20)]
    pub top: usize,
}

#[derive(Parser)]
pub struct SummarizeArgs {
    /// CSV file to summarize.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Pipeline JSON file applied before grouping.
    #[arg(long, short = 'p', value_name = "FILE")]
    pub pipeline: Option<PathBuf>,

    /// Column to group by.
    #[arg(long, value_name = "COLUMN")]
    pub by: String,

    /// Column to aggregate.
    #[arg(long, value_name = "COLUMN")]
    pub value: String,

    /// Aggregation applied per group.
    #[arg(long, default_value = "median")]
    pub agg: Aggregation,

    /// How rows map to groups (column, hour, weekday, month).
    #[arg(long, default_value = "column")]
    pub key: GroupKey,

    /// Chart style.
    #[arg(long, value_enum, default_value = "bar")]
    pub chart: ChartArg,

    /// Chart title.
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ChartArg {
    Bar,
    Line,
}

impl From<ChartArg> for ChartKind {
    fn from(arg: ChartArg) -> Self {
        match arg {
            ChartArg::Bar => Self::Bar,
            ChartArg::Line => Self::Line,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
