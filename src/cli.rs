//! Command-line interface for strictly_digits.

use clap::{Parser, Subcommand};

/// Strictly Digits - adaptive digit-span memory trainer
#[derive(Parser, Debug)]
#[command(name = "strictly_digits")]
#[command(about = "Memorize a number, then type it back", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Train in the terminal UI
    Play {
        /// Path to the trainer config file
        #[arg(short, long, default_value = "strictly_digits.toml")]
        config: std::path::PathBuf,

        /// Digit count of the first round (overrides config)
        #[arg(short, long)]
        digits: Option<u32>,

        /// Clock cadence in milliseconds (overrides config)
        #[arg(long)]
        tick_ms: Option<u64>,

        /// Log file (overrides config)
        #[arg(long)]
        log_file: Option<std::path::PathBuf>,
    },

    /// Show the positional diff between a target and a guess
    Check {
        /// The number that was shown
        target: String,

        /// The number that was typed
        guess: String,

        /// Print the diff as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the reveal time for a digit count
    Budget {
        /// Number of digits
        digits: u32,
    },
}
