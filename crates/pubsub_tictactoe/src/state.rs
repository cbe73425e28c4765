//! Controller states.

use crate::events::GameEnded;
use crate::rules::Line;
use crate::types::Sign;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a game stands.
///
/// `Won` and `Tied` are terminal: only a reset leaves them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Waiting for the given sign to move.
    AwaitingMove(Sign),
    /// A sign completed a line.
    Won {
        /// Winning sign.
        sign: Sign,
        /// First complete line in scan order.
        line: Line,
    },
    /// The board filled with no line.
    Tied,
}

impl GameState {
    /// Returns true for `Won` and `Tied`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameState::AwaitingMove(_))
    }

    /// Returns the sign expected to move next.
    pub fn active_sign(&self) -> Option<Sign> {
        match self {
            GameState::AwaitingMove(sign) => Some(*sign),
            _ => None,
        }
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<Sign> {
        match self {
            GameState::Won { sign, .. } => Some(*sign),
            _ => None,
        }
    }

    /// Returns the coarse status.
    pub fn status(&self) -> GameStatus {
        match self {
            GameState::AwaitingMove(_) => GameStatus::InProgress,
            GameState::Won { .. } => GameStatus::Win,
            GameState::Tied => GameStatus::Tie,
        }
    }

    /// Returns the `game-ended` payload for a terminal state.
    pub fn ended(&self) -> Option<GameEnded> {
        match self {
            GameState::AwaitingMove(_) => None,
            GameState::Won { sign, line } => Some(GameEnded::Win {
                sign: *sign,
                line: line.clone(),
            }),
            GameState::Tied => Some(GameEnded::Tie),
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::AwaitingMove(sign) => write!(f, "In progress. {} to move.", sign),
            GameState::Won { sign, line } => write!(f, "Game over. {} wins on {}!", sign, line),
            GameState::Tied => write!(f, "Game over. Tie!"),
        }
    }
}

/// Coarse game status.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum GameStatus {
    /// Moves are being accepted.
    InProgress,
    /// Somebody won.
    Win,
    /// Nobody won.
    Tie,
}
