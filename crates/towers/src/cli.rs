//! Command-line interface for towers.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Towers - animated Towers of Hanoi in the terminal
#[derive(Parser, Debug)]
#[command(name = "towers")]
#[command(about = "Animated Towers of Hanoi puzzle and solver", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the interactive terminal view
    Tui {
        /// Number of discs (overrides the config file)
        #[arg(short, long)]
        discs: Option<usize>,

        /// Path to a puzzle config TOML file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Initial animation rate in ticks per second
        #[arg(long)]
        fps: Option<u32>,

        /// Where to write logs while the terminal is in use
        #[arg(long, default_value = "towers_tui.log")]
        log_file: PathBuf,
    },

    /// Animate the full solution headlessly and print the final board
    Solve {
        /// Number of discs (overrides the config file)
        #[arg(short, long)]
        discs: Option<usize>,

        /// Path to a puzzle config TOML file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the solver's move list without animating
    Moves {
        /// Number of discs
        #[arg(short, long, default_value = "3")]
        discs: usize,

        /// Print the moves as JSON
        #[arg(long)]
        json: bool,
    },
}
