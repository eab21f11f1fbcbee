//! Root CLI structure for fx-sim

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fx-sim")]
#[command(about = "Run and validate particle technique descriptions", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate a technique headless and report statistics
    Run(RunArgs),

    /// Build a technique description and list its contents
    Validate {
        /// Path to the technique JSON file
        file: PathBuf,
    },

    /// Write an example technique description
    Template {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct RunArgs {
    /// Path to the technique JSON file
    pub file: PathBuf,

    /// Simulated time in seconds
    #[arg(short, long, default_value = "5")]
    pub seconds: f32,

    /// Frames per simulated second
    #[arg(short, long, default_value = "60")]
    pub fps: u32,

    /// Override the seed from the description
    #[arg(long, env = "FX_SIM_SEED")]
    pub seed: Option<u64>,

    /// Emit one JSON object per reported second instead of a table
    #[arg(long)]
    pub json: bool,
}
