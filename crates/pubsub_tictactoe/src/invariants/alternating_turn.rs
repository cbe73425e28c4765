//! Alternating turn invariant: signs alternate starting with the first mover.

use super::Invariant;
use crate::controller::GameController;

/// Invariant: players alternate turns.
///
/// The first recorded move belongs to the first mover, no sign moves twice
/// in a row, and while a move is awaited the expected sign follows from the
/// history length.
pub struct AlternatingTurnInvariant;

impl Invariant<GameController> for AlternatingTurnInvariant {
    fn holds(game: &GameController) -> bool {
        let first = game.players().first().sign();
        let second = game.players().second().sign();
        let history = game.history();

        if let Some(opening) = history.first()
            && opening.sign != first
        {
            return false;
        }

        if history.windows(2).any(|pair| pair[0].sign == pair[1].sign) {
            return false;
        }

        match game.state().active_sign() {
            Some(active) => {
                let expected = if history.len() % 2 == 0 { first } else { second };
                active == expected
            }
            None => true,
        }
    }

    fn description() -> &'static str {
        "Players alternate turns, first mover first"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameConfig, GameState, Move, Sign};

    #[test]
    fn test_empty_game_holds() {
        let game = GameController::new(&GameConfig::new()).unwrap();
        assert!(AlternatingTurnInvariant::holds(&game));
    }

    #[test]
    fn test_alternating_sequence_holds() {
        let mut game = GameController::new(&GameConfig::new()).unwrap();
        for index in [0, 4, 2, 6, 8] {
            game.request_move(index).unwrap();
            assert!(AlternatingTurnInvariant::holds(&game));
        }
        assert_eq!(game.state(), &GameState::AwaitingMove(Sign::O));
    }

    #[test]
    fn test_same_player_twice_violates() {
        let mut game = GameController::new(&GameConfig::new()).unwrap();
        game.request_move(0).unwrap();
        game.history.push(Move::new(4, Sign::X));
        assert!(!AlternatingTurnInvariant::holds(&game));
    }

    #[test]
    fn test_custom_first_mover() {
        let config = GameConfig::new().with_signs(Sign::O, Sign::X);
        let mut game = GameController::new(&config).unwrap();
        game.request_move(0).unwrap();
        assert_eq!(game.history()[0].sign, Sign::O);
        assert!(AlternatingTurnInvariant::holds(&game));
    }
}
