//! First-class invariants for the game controller.
//!
//! Invariants are logical properties that must hold after every accepted
//! move. They are checked in debug builds and can be tested independently.

use derive_more::Display;

// ─────────────────────────────────────────────────────────────
//  Invariant Trait
// ─────────────────────────────────────────────────────────────

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{description}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Invariant Sets
// ─────────────────────────────────────────────────────────────

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples of two and three invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        collect(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        collect(violations)
    }
}

// ─────────────────────────────────────────────────────────────
//  Controller Invariants
// ─────────────────────────────────────────────────────────────

pub mod alternating_turn;
pub mod history_consistent;
pub mod single_active_player;

pub use alternating_turn::AlternatingTurnInvariant;
pub use history_consistent::HistoryConsistentInvariant;
pub use single_active_player::SingleActivePlayerInvariant;

/// All controller invariants as a composable set.
pub type GameInvariants = (
    SingleActivePlayerInvariant,
    HistoryConsistentInvariant,
    AlternatingTurnInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameConfig, GameController, Sign};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        let game = GameController::new(&GameConfig::new()).unwrap();
        assert!(GameInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut game = GameController::new(&GameConfig::new()).unwrap();
        for index in [0, 4, 2] {
            game.request_move(index).unwrap();
        }
        assert!(GameInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut game = GameController::new(&GameConfig::new()).unwrap();
        game.request_move(4).unwrap();

        // A stray O with no history entry, and both players active.
        game.board.force(0, Sign::O);
        game.players.first.set_turn(true);

        let violations = GameInvariants::check_all(&game).unwrap_err();
        assert_eq!(violations.len(), 2);
        assert_eq!(
            violations[0].description,
            <SingleActivePlayerInvariant as Invariant<GameController>>::description()
        );
        assert_eq!(
            violations[1].description,
            <HistoryConsistentInvariant as Invariant<GameController>>::description()
        );
    }

    #[test]
    fn test_two_invariants_as_set() {
        let game = GameController::new(&GameConfig::new()).unwrap();
        type TwoInvariants = (SingleActivePlayerInvariant, AlternatingTurnInvariant);
        assert!(TwoInvariants::check_all(&game).is_ok());
    }
}
