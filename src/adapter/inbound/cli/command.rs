//! Command-line interface definitions.
//!
//! Defines the CLI structure for the payoff application using `clap`.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Plan loan payments that minimize total interest under a monthly budget
#[derive(Parser, Debug)]
#[command(name = "payoff")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the payoff CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the interest-minimizing payment schedule
    Optimize(OptimizeArgs),

    /// Validate a scenario file without solving
    Check(ConfigPathArg),
}

/// Shared argument for commands that only need a scenario path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to scenario file
    #[arg(short, long, default_value = "scenario.toml")]
    pub config: PathBuf,
}

/// Arguments for the `optimize` subcommand.
#[derive(Parser, Debug)]
pub struct OptimizeArgs {
    /// Path to scenario file
    #[arg(short, long, default_value = "scenario.toml")]
    pub config: PathBuf,

    /// Override the monthly budget
    #[arg(long)]
    pub budget: Option<Decimal>,

    /// Override the maximum number of months to model
    #[arg(long)]
    pub max_months: Option<u32>,

    /// First month of the plan (YYYY-MM)
    #[arg(long)]
    pub start: Option<String>,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,

    /// Print only the summary, not the month-by-month table
    #[arg(long)]
    pub summary_only: bool,
}
