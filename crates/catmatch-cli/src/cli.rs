//! CLI argument definitions.

use std::path::PathBuf;

use catmatch_map::Consumption;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "catmatch",
    version,
    about = "Pair two catalog label lists by textual similarity",
    long_about = "Pair two lists of free-text labels one-to-one by case-insensitive\n\
                  longest common subsequence, greedily taking the most similar pairs\n\
                  first. Labels without a counterpart are paired with a placeholder."
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

    /// Allow label text in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Match the source and target blocks of an input file.
    Match(MatchArgs),

    /// Print the similarity score of two labels.
    Score(ScoreArgs),
}

#[derive(Parser)]
pub struct MatchArgs {
    /// Input file (default: input.txt, or the config file's value).
    #[arg(long = "input", short = 'i', value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output file for key:value lines (default: output.txt).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// TOML config file (default: ./catmatch.toml when present).
    #[arg(long = "config", short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Value paired with labels that found no counterpart.
    #[arg(long = "placeholder", value_name = "TEXT")]
    pub placeholder: Option<String>,

    /// How already-paired labels are tracked.
    ///
    /// `index` treats repeated labels as separate items. `value` treats every
    /// copy of a paired label as used.
    #[arg(long = "consume", value_enum)]
    pub consume: Option<ConsumeArg>,

    /// Never pair labels scoring below this similarity.
    #[arg(long = "min-similarity", value_name = "N")]
    pub min_similarity: Option<usize>,

    /// Also write a JSON report with every pair and its score.
    #[arg(long = "json-report", value_name = "PATH")]
    pub json_report: Option<PathBuf>,

    /// Match and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Skip the per-pair table in the summary.
    #[arg(long = "no-pairs")]
    pub no_pairs: bool,
}

#[derive(Parser)]
pub struct ScoreArgs {
    /// First label.
    pub source: String,

    /// Second label.
    pub target: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ConsumeArg {
    Index,
    Value,
}

impl From<ConsumeArg> for Consumption {
    fn from(arg: ConsumeArg) -> Self {
        match arg {
            ConsumeArg::Index => Self::ByIndex,
            ConsumeArg::Value => Self::ByValue,
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
