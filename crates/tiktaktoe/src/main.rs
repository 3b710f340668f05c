//! tiktaktoe - terminal tic-tac-toe
//!
//! Opens the lobby by default; `leaderboard` prints the standings instead.

#![warn(missing_docs)]

mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use cli::{Cli, Command, MarkArg};
use tiktaktoe::{DriverConfig, Leaderboard, run_lobby};
use tiktaktoe_core::{Player, validate_username};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,tiktaktoe=debug,tiktaktoe_core=debug";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = DriverConfig::load_or_default(&cli.config)?;
    if let Some(path) = cli.leaderboard {
        config = config.with_leaderboard_path(path);
    }

    match cli.command {
        None => run_play(config, None, MarkArg::X).await,
        Some(Command::Play { name, mark }) => run_play(config, name, mark).await,
        Some(Command::Leaderboard { top }) => print_leaderboard(&config, top),
    }
}

/// Runs the lobby with logging redirected to the configured file.
async fn run_play(config: DriverConfig, name: Option<String>, mark: MarkArg) -> Result<()> {
    init_file_tracing(config.log_file())?;

    let player = match name {
        Some(name) if validate_username(&name) => Some(Player::human(name.trim(), mark.into())),
        Some(name) => bail!("Invalid username: {:?}", name),
        None => None,
    };

    run_lobby(config, player).await
}

/// Prints the top entries to stdout.
#[instrument(skip(config))]
fn print_leaderboard(config: &DriverConfig, top: Option<usize>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();

    let n = top.unwrap_or(*config.leaderboard_size());
    info!(path = %config.leaderboard_path().display(), n, "Printing leaderboard");
    let board = Leaderboard::load(config.leaderboard_path())?;
    println!("{}", board.render_top(n));
    Ok(())
}

/// Logs to a file so the terminal UI is not corrupted.
///
/// Fails if the log file cannot be created or a global subscriber is
/// already installed.
fn init_file_tracing(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;
    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
