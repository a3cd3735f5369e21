//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::storage::ENV_CONFIG;

/// Control a Nissan Leaf through the vehicle API.
#[derive(Parser, Debug)]
#[command(name = "leafctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // === Global flags ===
    /// Settings file to use
    #[arg(long, value_name = "PATH", env = ENV_CONFIG, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Shorthand for --format json
    #[arg(long, global = true)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log level
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Emit JSONL logs to stderr
    #[arg(long, global = true)]
    pub json_output: bool,

    /// Verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the effective output format.
    #[must_use]
    pub fn effective_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Turn climate control on
    #[command(name = "climateon")]
    ClimateOn,

    /// Turn climate control off
    #[command(name = "climateoff")]
    ClimateOff,

    /// Show charge status and range estimates
    #[command(name = "batteryinfo")]
    BatteryInfo,

    /// Show this month's energy use and cost
    #[command(name = "energyinfo")]
    EnergyInfo,
}

impl Commands {
    /// Command name as typed on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ClimateOn => "climateon",
            Self::ClimateOff => "climateoff",
            Self::BatteryInfo => "batteryinfo",
            Self::EnergyInfo => "energyinfo",
        }
    }
}

/// Output format options.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON output
    Json,
    /// Markdown output
    Md,
}
