//! Contract-based validation for move requests.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} action {Q}. Preconditions run before every move; postconditions run
//! in debug builds after every accepted move.

use crate::controller::GameController;
use crate::error::InvalidMoveError;
use crate::invariants::{GameInvariants, InvariantSet, InvariantViolation};
use crate::types::Square;
use tracing::{error, instrument};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), InvalidMoveError>;

    /// Checks postconditions after applying the action.
    fn post(after: &S) -> Result<(), Vec<InvariantViolation>>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has not reached a terminal state.
pub struct GameNotOver;

impl GameNotOver {
    /// Rejects moves once the game is won or tied.
    #[instrument(skip(game))]
    pub fn check(game: &GameController) -> Result<(), InvalidMoveError> {
        if game.state().is_terminal() {
            Err(InvalidMoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the index names a cell on the board.
pub struct CellInBounds;

impl CellInBounds {
    /// Rejects indices at or past `size * size`.
    #[instrument(skip(game))]
    pub fn check(index: usize, game: &GameController) -> Result<(), InvalidMoveError> {
        let cells = game.board().cell_count();
        if index < cells {
            Ok(())
        } else {
            Err(InvalidMoveError::OutOfBounds { index, cells })
        }
    }
}

/// Precondition: the target square is empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Rejects occupied squares.
    #[instrument(skip(game))]
    pub fn check(index: usize, game: &GameController) -> Result<(), InvalidMoveError> {
        match game.board().get(index) {
            Some(Square::Occupied(sign)) => Err(InvalidMoveError::Occupied { index, sign }),
            _ => Ok(()),
        }
    }
}

/// Composite precondition for a move request.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions, cheapest first.
    #[instrument(skip(game))]
    pub fn check(index: usize, game: &GameController) -> Result<(), InvalidMoveError> {
        GameNotOver::check(game)?;
        CellInBounds::check(index, game)?;
        SquareIsEmpty::check(index, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move requests, keyed by cell index.
///
/// Preconditions:
/// - Game is not over
/// - Index is on the board
/// - Square is empty
///
/// Postconditions:
/// - Exactly one player is active
/// - History matches the board
/// - Signs alternate
pub struct MoveContract;

impl Contract<GameController, usize> for MoveContract {
    fn pre(game: &GameController, index: &usize) -> Result<(), InvalidMoveError> {
        LegalMove::check(*index, game)
    }

    fn post(after: &GameController) -> Result<(), Vec<InvariantViolation>> {
        GameInvariants::check_all(after)
    }
}

// ─────────────────────────────────────────────────────────────
//  Debug Assertions
// ─────────────────────────────────────────────────────────────

/// Asserts that all controller invariants hold (panics on violation in debug builds).
#[instrument(skip(game))]
pub fn assert_invariants(game: &GameController) {
    if cfg!(debug_assertions)
        && let Err(violations) = <MoveContract as Contract<GameController, usize>>::post(game)
    {
        error!(?violations, "Controller invariants violated");
        panic!("Controller invariants violated: {:?}", violations);
    }
}
