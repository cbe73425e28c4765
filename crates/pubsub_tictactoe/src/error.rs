//! Error types for the game core.

use crate::events::EventName;
use crate::types::Sign;
use derive_more::{Display, Error, From};
use tracing::instrument;

/// A move request that cannot be applied.
///
/// Rejected moves leave the board, the players and the game state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum InvalidMoveError {
    /// The cell index is outside the board.
    #[display("Cell {index} is out of bounds (board has {cells} cells)")]
    OutOfBounds {
        /// Requested cell index.
        index: usize,
        /// Number of cells on the board.
        cells: usize,
    },

    /// The cell already holds a sign.
    #[display("Cell {index} is already occupied by {sign}")]
    Occupied {
        /// Requested cell index.
        index: usize,
        /// Sign currently occupying the cell.
        sign: Sign,
    },

    /// The game has been won or tied.
    #[display("Game is already over")]
    GameOver,
}

/// Configuration rejected before a game could start.
#[derive(Debug, Clone, Display, Error)]
#[display("Invalid configuration: {} at {}:{}", message, file, line)]
pub struct InvalidConfigurationError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl InvalidConfigurationError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// A board whose square count does not match its side length.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Board of size {size} cannot hold {squares} squares")]
pub struct InvalidBoardError {
    /// Declared side length.
    pub size: usize,
    /// Number of squares supplied.
    pub squares: usize,
}

/// Event bus failures.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EventBusError {
    /// A nested emit went deeper than the bus allows.
    #[display("Refused to emit {name}: nesting depth limit {limit} reached")]
    DepthExceeded {
        /// Event that was refused.
        name: EventName,
        /// Configured nesting limit.
        limit: usize,
    },
}

/// Any error surfaced by a game session.
#[derive(Debug, Clone, Display, Error, From)]
pub enum GameError {
    /// Move rejected.
    #[display("{_0}")]
    Move(InvalidMoveError),
    /// Configuration rejected.
    #[display("{_0}")]
    Configuration(InvalidConfigurationError),
    /// Event delivery failed.
    #[display("{_0}")]
    Bus(EventBusError),
}
