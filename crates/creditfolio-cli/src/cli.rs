//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    CorrelationArgs, ExportArgs, MetricsArgs, RatingArgs, RunArgs, SummaryArgs,
};

/// Creditfolio - Corporate bond and CDS portfolio analytics
#[derive(Parser)]
#[command(name = "creditfolio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Run configuration file (TOML)
    #[arg(short, long, global = true, env = "CREDITFOLIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Portfolio file, overriding the configuration
    #[arg(long, global = true)]
    pub portfolio: Option<PathBuf>,

    /// Price history CSV, overriding the configuration
    #[arg(long, global = true)]
    pub prices: Option<PathBuf>,

    /// Valuation date (YYYY-MM-DD), overriding the portfolio file
    #[arg(long, global = true)]
    pub valuation_date: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Summarize the portfolio from reference data alone
    Summary(SummaryArgs),

    /// Fetch price histories and show per-security metrics
    Metrics(MetricsArgs),

    /// Show the return correlation matrix
    Correlation(CorrelationArgs),

    /// Run the full pipeline and show enriched positions
    Run(RunArgs),

    /// Run the full pipeline and write the CSV tables
    Export(ExportArgs),

    /// Convert between rating letters and numeric scores
    Rating(RatingArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (one line)
    Minimal,
}
