//! CLI argument definitions for dqa.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dqa",
    version,
    about = "dqa - Tabular data-quality audit",
    long_about = "Audit a tabular file (CSV or workbook) for data-quality problems.\n\n\
                  Reports duplicate rows and columns, missing values and missing-value\n\
                  patterns, numeric and categorical outliers, sequence and primary-key\n\
                  candidates, and probable typos. Exit status 0 means the audit ran;\n\
                  an empty report means no issues were found."
)]
pub struct Cli {
    /// Path to the CSV or workbook file to audit.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Sheet to audit for workbook inputs (default: first sheet).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Force the input format instead of inferring it from the extension.
    #[arg(long = "format", value_enum)]
    pub format: Option<FormatArg>,

    /// Character encoding for CSV inputs (an encoding label such as latin1).
    #[arg(long = "encoding", value_name = "LABEL")]
    pub encoding: Option<String>,

    /// Print the findings as a JSON report instead of plain lines.
    #[arg(long = "json")]
    pub json: bool,

    /// Skip the summary table after the findings list.
    #[arg(long = "no-summary")]
    pub no_summary: bool,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

/// CLI input format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Excel,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
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
