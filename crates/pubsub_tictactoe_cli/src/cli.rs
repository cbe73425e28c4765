//! Command-line interface for the tictactoe binary.

use clap::{Parser, Subcommand};
use pubsub_tictactoe::{GameConfig, InvalidConfigurationError};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Tic-tac-toe played entirely through events
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Event-driven tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML game configuration
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Board side length (overrides the config file)
    #[arg(short, long, global = true)]
    pub size: Option<usize>,

    /// Name of the first mover (overrides the config file)
    #[arg(long, global = true)]
    pub first_name: Option<String>,

    /// Name of the second mover (overrides the config file)
    #[arg(long, global = true)]
    pub second_name: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively: enter a cell number, `r` to reset,
    /// `names <first> <second>` to rename, `q` to quit
    Play,

    /// Feed a fixed move list through the event bus
    Replay {
        /// Comma-separated 0-based cell indices
        #[arg(short, long, value_delimiter = ',', required = true)]
        moves: Vec<usize>,

        /// Print outbound events as JSON lines instead of the board
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Builds the game configuration from the optional file and overrides.
    #[instrument(skip(self), fields(config = ?self.config))]
    pub fn game_config(&self) -> Result<GameConfig, InvalidConfigurationError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(size) = self.size {
            config = config.with_board_size(size);
        }

        if self.first_name.is_some() || self.second_name.is_some() {
            let first = self
                .first_name
                .clone()
                .unwrap_or_else(|| config.first_name().clone());
            let second = self
                .second_name
                .clone()
                .unwrap_or_else(|| config.second_name().clone());
            config = config.with_names(first, second);
        }

        config.validate()?;
        debug!(?config, "Configuration resolved");
        Ok(config)
    }
}
