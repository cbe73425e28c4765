//! Domain events exchanged over the [`EventBus`](crate::EventBus).
//!
//! Each wire name has exactly one payload shape, so handlers match on
//! [`Event`] variants instead of inspecting loosely typed dictionaries.
//!
//! Inbound (renderer to core): `request-move`, `request-reset`,
//! `set-player-names`. Outbound (core to renderer): `board-created`,
//! `board-updated`, `game-ended`.

use crate::rules::Line;
use crate::types::{Board, Sign};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};
use tracing::debug;

/// Name under which handlers subscribe.
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
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EventName {
    /// A renderer asks to place the active sign.
    RequestMove,
    /// A renderer asks for a fresh game.
    RequestReset,
    /// A renderer renames the players.
    SetPlayerNames,
    /// The board was (re)created.
    BoardCreated,
    /// A cell was filled.
    BoardUpdated,
    /// The game reached a terminal state.
    GameEnded,
}

impl EventName {
    /// Returns true for events the core consumes.
    pub fn is_inbound(self) -> bool {
        matches!(
            self,
            EventName::RequestMove | EventName::RequestReset | EventName::SetPlayerNames
        )
    }
}

/// How a game ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GameEnded {
    /// A sign completed a line.
    Win {
        /// Winning sign.
        sign: Sign,
        /// The first complete line in scan order.
        line: Line,
    },
    /// The board filled with no line.
    Tie,
}

/// An event and its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Event {
    /// Place the active sign at `cell_index`.
    RequestMove {
        /// Target cell in row-major order.
        cell_index: usize,
    },
    /// Start over with an empty board.
    RequestReset,
    /// Rename both players.
    SetPlayerNames {
        /// Name of the first mover.
        first_name: String,
        /// Name of the second mover.
        second_name: String,
    },
    /// Snapshot of a freshly created board.
    BoardCreated {
        /// The empty board.
        board: Board,
    },
    /// A cell was filled.
    BoardUpdated {
        /// Cell index.
        index: usize,
        /// Sign placed.
        sign: Sign,
    },
    /// The game is over.
    GameEnded(GameEnded),
}

impl Event {
    /// Returns the name handlers subscribe under for this payload.
    pub fn name(&self) -> EventName {
        match self {
            Event::RequestMove { .. } => EventName::RequestMove,
            Event::RequestReset => EventName::RequestReset,
            Event::SetPlayerNames { .. } => EventName::SetPlayerNames,
            Event::BoardCreated { .. } => EventName::BoardCreated,
            Event::BoardUpdated { .. } => EventName::BoardUpdated,
            Event::GameEnded(_) => EventName::GameEnded,
        }
    }
}

/// Ordered queue of events produced while state is being mutated.
///
/// Components publish here instead of calling handlers directly; the session
/// emits the queue on the bus once the mutation is finished.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    pending: Vec<Event>,
}

impl Outbox {
    /// Creates an empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an event.
    pub fn publish(&mut self, event: Event) {
        debug!(event = %event.name(), "Queued event");
        self.pending.push(event);
    }

    /// Removes and returns all queued events in publish order.
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.pending)
    }

    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
