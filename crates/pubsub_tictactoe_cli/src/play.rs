//! Interactive and scripted game loops.

use derive_more::{Display, Error};
use pubsub_tictactoe::{Event, GameError, GameSession, InvalidMoveError};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, info, instrument, warn};

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    /// Place the active sign at this 0-based cell.
    Cell(usize),
    /// Start a new game.
    Reset,
    /// Rename both players.
    Names(String, String),
    /// Leave the game.
    Quit,
}

/// Input that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum InputError {
    /// Not a command and not a cell number.
    #[display("Unrecognized input '{_0}'. Enter a cell number, r, names <first> <second>, or q")]
    Unrecognized(#[error(not(source))] String),

    /// Cells are numbered from one.
    #[display("Cells are numbered from 1")]
    ZeroCell,

    /// `names` needs exactly two words.
    #[display("Usage: names <first> <second>")]
    NamesUsage,
}

impl FromStr for PlayerInput {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        match words.next() {
            Some("q" | "quit") => Ok(PlayerInput::Quit),
            Some("r" | "reset") => Ok(PlayerInput::Reset),
            Some("names") => match (words.next(), words.next(), words.next()) {
                (Some(first), Some(second), None) => {
                    Ok(PlayerInput::Names(first.to_string(), second.to_string()))
                }
                _ => Err(InputError::NamesUsage),
            },
            Some(word) => match word.parse::<usize>() {
                Ok(0) => Err(InputError::ZeroCell),
                Ok(cell) => Ok(PlayerInput::Cell(cell - 1)),
                Err(_) => Err(InputError::Unrecognized(s.trim().to_string())),
            },
            None => Err(InputError::Unrecognized(String::new())),
        }
    }
}

/// Explains a rejected move in 1-based cell numbers.
pub fn describe_rejection(err: &InvalidMoveError) -> String {
    match err {
        InvalidMoveError::OutOfBounds { cells, .. } => {
            format!("Choose a cell between 1 and {cells}")
        }
        InvalidMoveError::Occupied { index, sign } => {
            format!("Cell {} is already taken by {sign}", index + 1)
        }
        InvalidMoveError::GameOver => {
            "The game is over. Enter r to play again or q to quit".to_string()
        }
    }
}

/// Runs the interactive loop until `q` or end of input.
///
/// Board output comes from whatever renderers are attached to the session's
/// bus. `out` only receives prompts and feedback on rejected input.
#[instrument(skip_all)]
pub fn run_interactive<R: BufRead, W: Write>(
    session: &GameSession,
    input: R,
    mut out: W,
) -> anyhow::Result<()> {
    info!("Interactive game started");
    session.start()?;
    prompt(session, &mut out)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            prompt(session, &mut out)?;
            continue;
        }

        match line.parse::<PlayerInput>() {
            Ok(PlayerInput::Quit) => {
                debug!("Player quit");
                break;
            }
            Ok(PlayerInput::Reset) => session.reset()?,
            Ok(PlayerInput::Names(first, second)) => session.set_player_names(&first, &second)?,
            Ok(PlayerInput::Cell(index)) => match session.request_move(index) {
                Ok(_) => {}
                Err(GameError::Move(e)) => writeln!(out, "{}", describe_rejection(&e))?,
                Err(e) => return Err(e.into()),
            },
            Err(e) => writeln!(out, "{e}")?,
        }
        prompt(session, &mut out)?;
    }

    info!("Interactive game finished");
    Ok(())
}

fn prompt<W: Write>(session: &GameSession, out: &mut W) -> std::io::Result<()> {
    if session.state().is_terminal() {
        writeln!(out, "Enter r to play again or q to quit")?;
    } else {
        let players = session.players();
        if let Some(player) = players.active() {
            write!(out, "{} ({}), choose a cell: ", player.label(), player.sign())?;
        }
    }
    out.flush()
}

/// Starts a game and sends each index through the bus as `request-move`.
///
/// Rejected moves are skipped; the core logs them.
#[instrument(skip(session))]
pub fn run_replay(session: &GameSession, moves: &[usize]) -> Result<(), GameError> {
    session.start()?;
    for &cell_index in moves {
        if session.state().is_terminal() {
            warn!(cell_index, "Game already ended, ignoring remaining moves");
            break;
        }
        session.bus().emit(&Event::RequestMove { cell_index })?;
    }
    info!(state = %session.state(), "Replay finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::TerminalRenderer;
    use pubsub_tictactoe::{GameConfig, GameState, Sign};
    use std::io::Cursor;

    #[test]
    fn test_parse_commands() {
        assert_eq!("5".parse::<PlayerInput>(), Ok(PlayerInput::Cell(4)));
        assert_eq!(" q ".parse::<PlayerInput>(), Ok(PlayerInput::Quit));
        assert_eq!("reset".parse::<PlayerInput>(), Ok(PlayerInput::Reset));
        assert_eq!(
            "names Ada Grace".parse::<PlayerInput>(),
            Ok(PlayerInput::Names("Ada".to_string(), "Grace".to_string()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("0".parse::<PlayerInput>(), Err(InputError::ZeroCell));
        assert_eq!("names Ada".parse::<PlayerInput>(), Err(InputError::NamesUsage));
        assert_eq!(
            "move".parse::<PlayerInput>(),
            Err(InputError::Unrecognized("move".to_string()))
        );
    }

    #[test]
    fn test_interactive_game_to_win() {
        let session = GameSession::new(GameConfig::new()).unwrap();
        let renderer = TerminalRenderer::new(Vec::new(), &session.players());
        renderer.attach(session.bus());

        let mut prompts = Vec::new();
        run_interactive(&session, Cursor::new("1\n5\n2\n8\n3\nq\n"), &mut prompts).unwrap();

        assert_eq!(session.state().winner(), Some(Sign::X));
        let prompts = String::from_utf8(prompts).unwrap();
        assert!(prompts.starts_with("X (X), choose a cell: "));
        assert!(prompts.ends_with("Enter r to play again or q to quit\n"));

        let board = String::from_utf8(renderer.output().clone()).unwrap();
        assert!(board.contains("wins with cells 1, 2, 3"));
    }

    #[test]
    fn test_interactive_reports_rejections() {
        let session = GameSession::new(GameConfig::new()).unwrap();
        let mut prompts = Vec::new();
        run_interactive(&session, Cursor::new("5\n5\n10\nhello\n"), &mut prompts).unwrap();

        let prompts = String::from_utf8(prompts).unwrap();
        assert!(prompts.contains("Cell 5 is already taken by X"));
        assert!(prompts.contains("Choose a cell between 1 and 9"));
        assert!(prompts.contains("Unrecognized input 'hello'"));
        assert_eq!(session.state(), GameState::AwaitingMove(Sign::O));
    }

    #[test]
    fn test_interactive_rename_and_reset() {
        let session = GameSession::new(GameConfig::new()).unwrap();
        let mut prompts = Vec::new();
        run_interactive(&session, Cursor::new("names Ada Grace\n5\nr\n"), &mut prompts).unwrap();

        assert!(session.history().is_empty());
        let prompts = String::from_utf8(prompts).unwrap();
        assert!(prompts.contains("Grace (O), choose a cell: "));
        assert!(prompts.ends_with("Ada (X), choose a cell: "));
    }

    #[test]
    fn test_interactive_rename_updates_renderer() {
        let session = GameSession::new(GameConfig::new()).unwrap();
        let renderer = TerminalRenderer::new(Vec::new(), &session.players());
        renderer.attach(session.bus());

        let mut prompts = Vec::new();
        run_interactive(&session, Cursor::new("names Ada Grace\n5\nq\n"), &mut prompts).unwrap();

        let board = String::from_utf8(renderer.output().clone()).unwrap();
        assert!(board.contains("Players: Ada (X) vs Grace (O)"));
        assert!(board.contains("Ada (X) takes cell 5"));
        assert!(!board.contains("X (X) takes cell 5"));
    }

    #[test]
    fn test_replay_skips_rejected_and_stops_at_end() {
        let session = GameSession::new(GameConfig::new()).unwrap();
        run_replay(&session, &[0, 0, 4, 1, 7, 2, 8]).unwrap();

        assert_eq!(session.state().winner(), Some(Sign::X));
        assert_eq!(session.history().len(), 5);
    }
}
