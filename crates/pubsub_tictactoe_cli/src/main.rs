//! Tictactoe - terminal front end for the event-driven game core
//!
//! Renders the board purely from bus events and sends player input back as
//! requests.

#![warn(missing_docs)]

mod cli;
mod play;
mod renderer;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use pubsub_tictactoe::GameSession;
use renderer::{JsonLinesRenderer, TerminalRenderer};
use std::io;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.game_config()?;
    let session = GameSession::new(config)?;

    match cli.command {
        Command::Play => run_play(&session),
        Command::Replay { moves, json } => run_replay(&session, &moves, json),
    }
}

/// Plays interactively on stdin and stdout.
#[instrument(skip(session))]
fn run_play(session: &GameSession) -> Result<()> {
    info!("Starting interactive game");
    let renderer = TerminalRenderer::new(io::stdout(), &session.players());
    renderer.attach(session.bus());
    play::run_interactive(session, io::stdin().lock(), io::stdout())
}

/// Replays a move list, printing the board or JSON lines.
#[instrument(skip(session))]
fn run_replay(session: &GameSession, moves: &[usize], json: bool) -> Result<()> {
    info!(moves = moves.len(), "Starting replay");
    if json {
        JsonLinesRenderer::new(io::stdout()).attach(session.bus());
    } else {
        TerminalRenderer::new(io::stdout(), &session.players()).attach(session.bus());
    }
    play::run_replay(session, moves)?;
    Ok(())
}
