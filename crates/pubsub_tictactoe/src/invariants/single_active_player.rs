//! Single active player invariant: exactly one turn flag is set.

use super::Invariant;
use crate::controller::GameController;
use crate::state::GameState;

/// Invariant: exactly one player has the turn.
///
/// While a move is awaited, the active player's sign must also be the sign
/// the controller is waiting for. Terminal states leave the flags as they
/// were when the last move landed.
pub struct SingleActivePlayerInvariant;

impl Invariant<GameController> for SingleActivePlayerInvariant {
    fn holds(game: &GameController) -> bool {
        let players = game.players();
        if players.active_count() != 1 {
            return false;
        }

        match game.state() {
            GameState::AwaitingMove(sign) => {
                players.active().map(|p| p.sign()) == Some(*sign)
            }
            GameState::Won { .. } | GameState::Tied => true,
        }
    }

    fn description() -> &'static str {
        "Exactly one player has the turn"
    }
}
