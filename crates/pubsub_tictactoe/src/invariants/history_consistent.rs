//! History consistency invariant: the move log explains the board.

use super::Invariant;
use crate::controller::GameController;
use crate::types::Square;

/// Invariant: every occupied square comes from exactly one history entry.
///
/// The history length equals the number of occupied squares, and each
/// recorded move's square holds the recorded sign.
pub struct HistoryConsistentInvariant;

impl Invariant<GameController> for HistoryConsistentInvariant {
    fn holds(game: &GameController) -> bool {
        let board = game.board();
        let history = game.history();

        if history.len() != board.occupied_count() {
            return false;
        }

        history
            .iter()
            .all(|mv| board.get(mv.index) == Some(Square::Occupied(mv.sign)))
    }

    fn description() -> &'static str {
        "History matches the occupied squares"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameConfig, Move, Sign};

    #[test]
    fn test_holds_after_moves() {
        let mut game = GameController::new(&GameConfig::new()).unwrap();
        game.request_move(4).unwrap();
        game.request_move(0).unwrap();
        assert!(HistoryConsistentInvariant::holds(&game));
    }

    #[test]
    fn test_unrecorded_square_violates() {
        let mut game = GameController::new(&GameConfig::new()).unwrap();
        game.board.force(8, Sign::X);
        assert!(!HistoryConsistentInvariant::holds(&game));
    }

    #[test]
    fn test_wrong_sign_in_history_violates() {
        let mut game = GameController::new(&GameConfig::new()).unwrap();
        game.request_move(4).unwrap();
        game.history[0] = Move::new(4, Sign::O);
        assert!(!HistoryConsistentInvariant::holds(&game));
    }
}
