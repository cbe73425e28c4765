//! Turn management and result detection.

use crate::action::Move;
use crate::board::BoardModel;
use crate::config::GameConfig;
use crate::contracts::{Contract, MoveContract, assert_invariants};
use crate::error::{InvalidConfigurationError, InvalidMoveError};
use crate::events::{Event, GameEnded, Outbox};
use crate::player::{Player, Players};
use crate::rules::{WinLines, is_full};
use crate::state::{GameState, GameStatus};
use crate::types::{Board, Sign};
use tracing::{debug, info, instrument, warn};

/// Orchestrates one game: validates move requests, mutates the board,
/// runs the win check and decides the next state.
///
/// Outbound events are queued in an internal outbox and collected with
/// [`take_events`](Self::take_events).
#[derive(Debug, Clone)]
pub struct GameController {
    pub(crate) board: BoardModel,
    pub(crate) players: Players,
    pub(crate) state: GameState,
    pub(crate) history: Vec<Move>,
    lines: WinLines,
    outbox: Outbox,
}

impl GameController {
    /// Creates a controller awaiting the first mover on an empty board.
    ///
    /// The board is not announced until [`reset`](Self::reset) runs.
    #[instrument(skip(config), fields(board_size = config.board_size()))]
    pub fn new(config: &GameConfig) -> Result<Self, InvalidConfigurationError> {
        config.validate()?;
        let board = BoardModel::new(*config.board_size())?;
        let players = Players::new(
            *config.first_sign(),
            *config.second_sign(),
            config.first_name().clone(),
            config.second_name().clone(),
        );

        info!("Game controller created");
        Ok(Self {
            lines: WinLines::for_size(board.get().size()),
            board,
            state: GameState::AwaitingMove(players.first().sign()),
            players,
            history: Vec::new(),
            outbox: Outbox::new(),
        })
    }

    /// Places the active sign at `index`.
    ///
    /// On success returns the state after the move: still awaiting (with
    /// the turn passed to the other player), won, or tied.
    ///
    /// # Errors
    ///
    /// Rejects moves after the game ended, outside the board, or onto an
    /// occupied square. A rejected move changes nothing and queues no events.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn request_move(&mut self, index: usize) -> Result<GameState, InvalidMoveError> {
        MoveContract::pre(self, &index).inspect_err(|e| {
            warn!(error = %e, "Move rejected");
        })?;
        let sign = self.state.active_sign().ok_or(InvalidMoveError::GameOver)?;

        self.board.update(index, sign, &mut self.outbox)?;
        self.history.push(Move::new(index, sign));
        debug!(sign = %sign, moves = self.history.len(), "Move applied");

        if let Some(line) = self.lines.first_complete(self.board.get(), sign) {
            let line = line.clone();
            info!(sign = %sign, line = %line, "Game won");
            self.state = GameState::Won {
                sign,
                line: line.clone(),
            };
            self.outbox.publish(Event::GameEnded(GameEnded::Win { sign, line }));
        } else if is_full(self.board.get()) {
            info!("Game tied");
            self.state = GameState::Tied;
            self.outbox.publish(Event::GameEnded(GameEnded::Tie));
        } else {
            let next = self.players.toggle_turns();
            self.state = GameState::AwaitingMove(next);
        }

        assert_invariants(self);
        Ok(self.state.clone())
    }

    /// Creates a fresh board at the size the win lines were built for,
    /// hands the turn back to the first mover and clears the history.
    /// Queues `board-created`.
    ///
    /// Works from any state, including a finished game.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn reset(&mut self) -> Result<(), InvalidConfigurationError> {
        self.board.create(self.lines.size(), &mut self.outbox)?;
        self.players.reset_turns();
        self.history.clear();
        self.state = GameState::AwaitingMove(self.first_sign());
        info!("Game reset");
        Ok(())
    }

    /// Renames both players. Allowed in any state; names may be empty.
    #[instrument(skip(self))]
    pub fn set_player_names(&mut self, first_name: &str, second_name: &str) {
        self.players.set_names(first_name, second_name);
        debug!("Player names updated");
    }

    /// Removes and returns queued events in the order they were produced.
    pub fn take_events(&mut self) -> Vec<Event> {
        self.outbox.drain()
    }

    /// Returns the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the coarse status.
    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        self.board.get()
    }

    /// Returns both players.
    pub fn players(&self) -> &Players {
        &self.players
    }

    /// Returns the player whose turn it is.
    pub fn active_player(&self) -> Option<&Player> {
        self.state
            .active_sign()
            .and_then(|sign| self.players.by_sign(sign))
    }

    /// Returns the sign that moves first after every reset.
    pub fn first_sign(&self) -> Sign {
        self.players.first().sign()
    }

    /// Returns accepted moves in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the empty positions, or nothing once the game is over.
    pub fn valid_moves(&self) -> Vec<usize> {
        if self.state.is_terminal() {
            Vec::new()
        } else {
            self.board.get().empty_positions()
        }
    }
}
