//! Towers - Unified CLI
//!
//! Interactive terminal view and headless runners for the puzzle engine.

#![warn(missing_docs)]

mod cli;
mod headless;
mod tui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use towers_core::{PuzzleConfig, Speed};
use tracing::{debug, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Tui {
            discs,
            config,
            fps,
            log_file,
        } => {
            init_file_logging(&log_file)?;
            let config = load_config(config.as_deref(), discs, fps)?;
            tui::run_tui(config).await
        }
        Command::Solve {
            discs,
            config,
            json,
        } => {
            init_stderr_logging();
            let config = load_config(config.as_deref(), discs, None)?;
            headless::run_solve(config, json)
        }
        Command::Moves { discs, json } => {
            init_stderr_logging();
            headless::run_moves(discs, json)
        }
    }
}

/// Logs go to stderr so stdout stays clean for reports.
fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

/// Logs go to a file so they do not corrupt the terminal view.
fn init_file_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Builds the puzzle config from an optional file plus CLI overrides.
#[instrument(skip_all, fields(path = ?path.map(PathBuf::from), ?discs, ?fps))]
fn load_config(path: Option<&Path>, discs: Option<usize>, fps: Option<u32>) -> Result<PuzzleConfig> {
    let mut config = match path {
        Some(path) => PuzzleConfig::from_file(path)?,
        None => PuzzleConfig::default(),
    };
    if let Some(discs) = discs {
        config = config.with_discs(discs);
    }
    if let Some(fps) = fps {
        config = config.with_fps(Speed::new(fps).fps());
    }
    config.validate()?;
    debug!(?config, "Puzzle config resolved");
    Ok(config)
}
