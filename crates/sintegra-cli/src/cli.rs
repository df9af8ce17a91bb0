//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use sintegra_record::LineEnding;

#[derive(Parser)]
#[command(
    name = "sintegra",
    version,
    about = "Generate SINTEGRA fixed-width fiscal files",
    long_about = "Generate SINTEGRA fixed-width fiscal files.\n\n\
                  Records are read as JSON, validated against the record type\n\
                  catalog and written one fixed-width line per record."
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

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
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

#[derive(Subcommand)]
pub enum Command {
    /// Build a flat file from a JSON list of records.
    Build(BuildArgs),

    /// List record types, or the column layout of one record type.
    Layout(LayoutArgs),
}

#[derive(Parser)]
pub struct BuildArgs {
    /// JSON array of `{"register": "74", "fields": {...}}` objects.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file (default: <INPUT> with a .txt extension).
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Directory of additional or overriding record type catalogs (*.toml).
    #[arg(long = "catalog-dir", value_name = "DIR")]
    pub catalog_dir: Option<PathBuf>,

    /// Line terminator written after each record.
    #[arg(long = "line-ending", value_enum, default_value = "crlf")]
    pub line_ending: LineEndingArg,
}

#[derive(Parser)]
pub struct LayoutArgs {
    /// Record type code to describe (default: list every record type).
    #[arg(value_name = "CODE")]
    pub code: Option<String>,

    /// Directory of additional or overriding record type catalogs (*.toml).
    #[arg(long = "catalog-dir", value_name = "DIR")]
    pub catalog_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LineEndingArg {
    Crlf,
    Lf,
}

impl From<LineEndingArg> for LineEnding {
    fn from(value: LineEndingArg) -> Self {
        match value {
            LineEndingArg::Crlf => LineEnding::CrLf,
            LineEndingArg::Lf => LineEnding::Lf,
        }
    }
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
