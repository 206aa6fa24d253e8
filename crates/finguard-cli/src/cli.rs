//! Command-line argument parsing for the `finguard` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// finguard - compliance intent classifier for finance-assistant queries
#[derive(Parser)]
#[command(name = "finguard")]
#[command(about = "Classify finance queries as info, advisory or prediction", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Extra pattern catalog (overrides $FINGUARD_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify each argument, or each stdin line when none are given
    Classify {
        /// Queries to classify
        text: Vec<String>,

        /// Output one JSON object per line
        #[arg(long)]
        json: bool,
    },

    /// Print the system-prompt directive for a category
    Instruction {
        /// info | advisory | prediction
        category: String,
    },

    /// Load a catalog file and report its pattern counts
    CheckConfig {
        path: PathBuf,
    },
}
