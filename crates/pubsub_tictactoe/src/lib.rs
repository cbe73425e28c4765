//! Pub/sub tic-tac-toe - a game core driven entirely by events
//!
//! Components never call each other directly. The controller listens for
//! requests on an [`EventBus`] and answers with outbound events that any
//! number of renderers can observe.
//!
//! # Architecture
//!
//! - **Bus**: synchronous, single-threaded publish/subscribe
//! - **Board**: N×N grid that announces creation and every placement
//! - **Controller**: turn management, win and tie detection
//! - **Session**: one bus and one controller wired together
//!
//! # Example
//!
//! ```
//! use pubsub_tictactoe::{Event, EventName, GameConfig, GameSession};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = GameSession::new(GameConfig::new())?;
//! session.bus().on(EventName::GameEnded, |event| println!("{event:?}"));
//! session.start()?;
//!
//! for cell_index in [0, 4, 1, 7, 2] {
//!     session.bus().emit(&Event::RequestMove { cell_index })?;
//! }
//! assert!(session.state().is_terminal());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod bus;
mod config;
mod contracts;
mod controller;
mod error;
mod events;
pub mod invariants;
mod player;
mod rules;
mod session;
mod state;
mod types;

// Crate-level exports - Core types
pub use action::Move;
pub use types::{Board, Sign, Square};

// Crate-level exports - Event plumbing
pub use bus::{DEFAULT_MAX_EMIT_DEPTH, EventBus, Handler};
pub use events::{Event, EventName, GameEnded, Outbox};

// Crate-level exports - Game components
pub use board::BoardModel;
pub use controller::GameController;
pub use player::{Player, Players};
pub use session::GameSession;
pub use state::{GameState, GameStatus};

// Crate-level exports - Rules
pub use rules::{Line, WinLines, check_win, is_full};

// Crate-level exports - Validation
pub use contracts::{
    CellInBounds, Contract, GameNotOver, LegalMove, MoveContract, SquareIsEmpty,
    assert_invariants,
};
pub use invariants::{GameInvariants, Invariant, InvariantSet, InvariantViolation};

// Crate-level exports - Configuration
pub use config::{
    DEFAULT_BOARD_SIZE, GameConfig, MAX_BOARD_SIZE, MIN_BOARD_SIZE, validate_board_size,
};

// Crate-level exports - Errors
pub use error::{
    EventBusError, GameError, InvalidBoardError, InvalidConfigurationError, InvalidMoveError,
};
