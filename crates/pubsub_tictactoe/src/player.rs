//! Player state: sign, display name and turn flag.

use crate::types::Sign;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A player in the game.
///
/// Turn flags are flipped only through [`Players::toggle_turns`], which
/// flips both players together so exactly one of them is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    sign: Sign,
    name: String,
    has_turn: bool,
}

impl Player {
    /// Creates a player.
    pub fn new(sign: Sign, name: impl Into<String>, has_turn: bool) -> Self {
        Self {
            sign,
            name: name.into(),
            has_turn,
        }
    }

    /// Returns the player's sign.
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Returns the display name, possibly empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name, or the sign when no name was given.
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            self.sign.to_string()
        } else {
            self.name.clone()
        }
    }

    /// Returns whether it is this player's turn.
    pub fn has_turn(&self) -> bool {
        self.has_turn
    }

    /// Flips the turn flag and returns the new value.
    pub(crate) fn toggle_turn(&mut self) -> bool {
        self.has_turn = !self.has_turn;
        self.has_turn
    }

    pub(crate) fn set_turn(&mut self, has_turn: bool) {
        self.has_turn = has_turn;
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

/// The two players of a game, first mover first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Players {
    pub(crate) first: Player,
    pub(crate) second: Player,
}

impl Players {
    /// Creates both players with the first one active.
    #[instrument(skip(first_name, second_name))]
    pub fn new(
        first_sign: Sign,
        second_sign: Sign,
        first_name: impl Into<String>,
        second_name: impl Into<String>,
    ) -> Self {
        Self {
            first: Player::new(first_sign, first_name, true),
            second: Player::new(second_sign, second_name, false),
        }
    }

    /// Returns the first mover.
    pub fn first(&self) -> &Player {
        &self.first
    }

    /// Returns the second mover.
    pub fn second(&self) -> &Player {
        &self.second
    }

    /// Returns the player whose turn it is, if exactly one is active.
    pub fn active(&self) -> Option<&Player> {
        match (self.first.has_turn, self.second.has_turn) {
            (true, false) => Some(&self.first),
            (false, true) => Some(&self.second),
            _ => None,
        }
    }

    /// Looks up a player by sign.
    pub fn by_sign(&self, sign: Sign) -> Option<&Player> {
        [&self.first, &self.second]
            .into_iter()
            .find(|p| p.sign == sign)
    }

    /// Counts players whose turn flag is set.
    pub fn active_count(&self) -> usize {
        usize::from(self.first.has_turn) + usize::from(self.second.has_turn)
    }

    /// Hands the turn to the other player and returns the now-active sign.
    #[instrument(skip(self))]
    pub(crate) fn toggle_turns(&mut self) -> Sign {
        let first_active = self.first.toggle_turn();
        self.second.toggle_turn();
        let active = if first_active {
            self.first.sign
        } else {
            self.second.sign
        };
        debug!(active = %active, "Turn passed");
        active
    }

    /// Makes the first mover active again.
    pub(crate) fn reset_turns(&mut self) {
        self.first.set_turn(true);
        self.second.set_turn(false);
    }

    pub(crate) fn set_names(&mut self, first: impl Into<String>, second: impl Into<String>) {
        self.first.set_name(first);
        self.second.set_name(second);
    }
}
