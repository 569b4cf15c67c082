//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Score Brazilian stocks and listed funds and export a dashboard digest
#[derive(Parser, Debug)]
#[command(name = "b3-screener")]
#[command(version)]
pub struct Cli {
    /// Configuration file [default: ./config.toml when present]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Override the log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Screen every asset class and write the dashboard snapshot
    Export(ExportArgs),

    /// Screen one asset class with filters
    Screen(ScreenArgs),

    /// Save full dividend histories per ticker
    History(HistoryArgs),

    /// Write the snowball spreadsheet of funds by entry price
    Snowball(SnowballArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// List strategy tags and their rules
    Strategies,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate the configuration file
    Validate,
    /// Display the effective configuration with defaults applied
    Show,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Snapshot path [default: output.snapshot_path]
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ScreenArgs {
    /// Asset class: stock or fii
    #[arg(short = 't', long = "type", default_value = "stock")]
    pub asset_type: String,

    /// Minimum daily liquidity (R$)
    #[arg(long, default_value_t = 0.0)]
    pub min_liquidity: f64,

    /// Minimum dividend yield (%)
    #[arg(long, default_value_t = 0.0)]
    pub min_yield: f64,

    /// Maximum price / book
    #[arg(long, default_value_t = 999.0)]
    pub max_pb: f64,

    /// Minimum price / book
    #[arg(long, default_value_t = 0.0)]
    pub min_pb: f64,

    /// Maximum gross debt / equity (stocks only)
    #[arg(long, default_value_t = 999.0)]
    pub max_debt: f64,

    /// Minimum score
    #[arg(long, default_value_t = 0.0)]
    pub min_score: f64,

    /// Strategy or category labels to exclude, comma separated
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Save the results under the history directory
    #[arg(long)]
    pub save: bool,

    /// Rows to print (0 prints all)
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Tickers to fetch [default: the latest saved screening]
    pub tickers: Vec<String>,

    /// Refetch files younger than output.dividend_max_age_hours
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct SnowballArgs {
    /// CSV path [default: output.snowball_path]
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
