//! Strictly Digits - Unified CLI
//!
//! Adaptive digit-span memory trainer.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use strictly_digits::{diff, reveal_budget_ms, SpanNumber, TrainerConfig};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        None => run_play(PathBuf::from("strictly_digits.toml"), None, None, None).await,
        Some(Command::Play {
            config,
            digits,
            tick_ms,
            log_file,
        }) => run_play(config, digits, tick_ms, log_file).await,
        Some(Command::Check {
            target,
            guess,
            json,
        }) => {
            initialize_cli_tracing();
            run_check(&target, &guess, json)
        }
        Some(Command::Budget { digits }) => {
            initialize_cli_tracing();
            run_budget(digits)
        }
    }
}

/// Run the terminal trainer
async fn run_play(
    config_path: PathBuf,
    digits: Option<u32>,
    tick_ms: Option<u64>,
    log_file: Option<PathBuf>,
) -> Result<()> {
    let mut config = TrainerConfig::load_or_default(&config_path)?;
    if let Some(digits) = digits {
        config = config.with_starting_digits(digits);
    }
    if let Some(tick_ms) = tick_ms {
        config = config.with_tick_ms(tick_ms);
    }
    if let Some(log_file) = log_file {
        config = config.with_log_file(log_file);
    }

    strictly_digits::run_tui(config).await
}

/// Print the diff between two numbers
#[instrument]
fn run_check(target: &str, guess: &str, json: bool) -> Result<()> {
    let target: SpanNumber = target
        .parse()
        .with_context(|| format!("Invalid target {:?}", target))?;
    let guess: SpanNumber = guess
        .parse()
        .with_context(|| format!("Invalid guess {:?}", guess))?;

    let rendering = diff(&target, &guess);
    debug!(mismatches = ?rendering.mismatches(), "Computed diff");

    if json {
        println!("{}", serde_json::to_string_pretty(&rendering)?);
    } else {
        let verdict = if target.numerically_eq(&guess) { "match" } else { "mismatch" };
        println!("{}  ({})", rendering, verdict);
    }
    Ok(())
}

/// Print the reveal budget for a digit count
#[instrument]
fn run_budget(digits: u32) -> Result<()> {
    let budget = reveal_budget_ms(digits);
    info!(digits, budget, "Computed reveal budget");
    println!("{} digits: {:.1}s reveal", digits, budget as f64 / 1000.0);
    Ok(())
}

/// Logs to stderr for the one-shot commands; `play` logs to its own file.
fn initialize_cli_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,strictly_digits=debug")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
