//! CLI argument definitions for the fairness audit tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use fairness_ingest::DEFAULT_PREVIEW_ROWS;

#[derive(Parser)]
#[command(
    name = "fairness-audit",
    version,
    about = "Fairness audit - measure selection bias across protected groups",
    long_about = "Audit hiring selections for bias across a protected attribute.\n\n\
                  Computes demographic parity, disparate impact, error-rate parity,\n\
                  calibration and related metrics, classifies each one and explains\n\
                  what the result means."
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

    /// TOML file with an [analysis] table of default options.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze one dataset for a protected attribute.
    Analyze(AnalyzeArgs),

    /// Compare a baseline dataset against a candidate.
    Compare(CompareArgs),

    /// List every fairness metric and the columns it needs.
    Metrics,

    /// Show column statistics and the first rows of a dataset.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// CSV file with one row per candidate.
    #[arg(value_name = "CSV")]
    pub dataset: PathBuf,

    /// Protected attribute column (e.g. gender, age_group).
    #[arg(long = "attr", value_name = "NAME")]
    pub attr: String,

    /// Output format printed to stdout.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Also write the JSON report to this path.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Number of score quantile bins for calibration.
    #[arg(long = "calibration-bins", value_name = "N")]
    pub calibration_bins: Option<usize>,

    /// Compute only this metric (repeatable; see `metrics` for names).
    #[arg(long = "metric", value_name = "NAME")]
    pub metrics: Vec<String>,

    /// Exit with status 0 even when a metric is in violation.
    #[arg(long = "no-fail-on-violation")]
    pub no_fail_on_violation: bool,
}

#[derive(Parser)]
pub struct CompareArgs {
    /// CSV file with the baseline selections.
    #[arg(value_name = "BASELINE_CSV")]
    pub baseline: PathBuf,

    /// CSV file with the candidate selections.
    #[arg(value_name = "CANDIDATE_CSV")]
    pub candidate: PathBuf,

    /// Protected attribute column present in both files.
    #[arg(long = "attr", value_name = "NAME")]
    pub attr: String,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Also write the JSON report to this path.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Number of score quantile bins for calibration.
    #[arg(long = "calibration-bins", value_name = "N")]
    pub calibration_bins: Option<usize>,

    /// Compute only this metric (repeatable; see `metrics` for names).
    #[arg(long = "metric", value_name = "NAME")]
    pub metrics: Vec<String>,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// CSV file to inspect.
    #[arg(value_name = "CSV")]
    pub dataset: PathBuf,

    /// Number of leading rows to preview.
    #[arg(long = "rows", value_name = "N", default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub rows: usize,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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
