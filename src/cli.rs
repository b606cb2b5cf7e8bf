use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

pub use crate::io::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "homerisk")]
#[command(about = "Home system lifespan, failure risk and intervention scoring", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the nearest .homerisk.toml)
    #[arg(long, global = true, env = "HOMERISK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute p10/p50/p90 replacement windows for each system
    Window {
        /// Systems file: { "systems": [...] }
        #[arg(short, long)]
        input: PathBuf,

        /// Evaluation date (defaults to today)
        #[arg(long)]
        now: Option<NaiveDate>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Score intervention requests against the home's threshold
    Score {
        /// One scoring request or a list of them
        #[arg(short, long)]
        input: PathBuf,

        /// Threshold in dollars for requests that carry none
        #[arg(long)]
        threshold: Option<f64>,

        /// Attach a frozen snapshot to every eligible result
        #[arg(long)]
        capture: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Lay replacement windows out on a multi-year timeline
    Timeline {
        /// Systems file: { "systems": [...] }
        #[arg(short, long)]
        input: PathBuf,

        /// Years shown (defaults to the configured horizon)
        #[arg(long)]
        horizon: Option<u32>,

        /// Evaluation date (defaults to today)
        #[arg(long)]
        now: Option<NaiveDate>,

        /// System ids to list first, in order
        #[arg(long, value_delimiter = ',')]
        order: Option<Vec<String>>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Estimated impact of a maintenance action
    Impact {
        /// System type (hvac, roof, water_heater, ...)
        #[arg(long)]
        system_type: String,

        /// Maintenance category, e.g. filter_replacement
        #[arg(long)]
        category: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Write a default .homerisk.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
