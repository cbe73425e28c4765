//! A game session: one bus, one controller, wired together.

use crate::action::Move;
use crate::bus::{EventBus, Handler};
use crate::config::GameConfig;
use crate::controller::GameController;
use crate::error::{EventBusError, GameError, InvalidConfigurationError};
use crate::events::{Event, EventName};
use crate::player::Players;
use crate::state::GameState;
use crate::types::Board;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, info, instrument, warn};

/// Owns the event bus and the controller for one game.
///
/// The controller listens on the bus for `request-move`, `request-reset`
/// and `set-player-names`. Renderers subscribe to the outbound events through
/// [`bus`](Self::bus) and either emit requests on the bus or call the direct
/// methods here, which also report success or failure.
///
/// Sessions share nothing, so any number can run side by side.
pub struct GameSession {
    bus: Rc<EventBus>,
    controller: Rc<RefCell<GameController>>,
    inbound: Handler,
}

impl GameSession {
    /// Builds a session from validated configuration.
    #[instrument(skip(config), fields(board_size = config.board_size()))]
    pub fn new(config: GameConfig) -> Result<Self, InvalidConfigurationError> {
        let controller = Rc::new(RefCell::new(GameController::new(&config)?));
        let bus = Rc::new(EventBus::with_max_depth(*config.max_emit_depth()));
        let inbound = inbound_handler(Rc::clone(&controller), Rc::downgrade(&bus));

        for name in [
            EventName::RequestMove,
            EventName::RequestReset,
            EventName::SetPlayerNames,
        ] {
            bus.subscribe(name, Rc::clone(&inbound));
        }

        info!("Game session created");
        Ok(Self {
            bus,
            controller,
            inbound,
        })
    }

    /// Returns the session's bus.
    pub fn bus(&self) -> &Rc<EventBus> {
        &self.bus
    }

    /// Creates the board and announces it with `board-created`.
    ///
    /// Subscribe renderers before calling this.
    #[instrument(skip(self))]
    pub fn start(&self) -> Result<(), GameError> {
        info!("Starting game");
        dispatch(&self.controller, &self.bus, GameController::reset)??;
        Ok(())
    }

    /// Places the active sign at `index` and emits the resulting events.
    ///
    /// # Errors
    ///
    /// [`GameError::Move`] when the move is rejected (nothing changes and
    /// nothing is emitted). [`GameError::Bus`] when the move was applied but
    /// its events could not be delivered.
    #[instrument(skip(self))]
    pub fn request_move(&self, index: usize) -> Result<GameState, GameError> {
        let state = dispatch(&self.controller, &self.bus, |c| c.request_move(index))??;
        Ok(state)
    }

    /// Starts over from an empty board with the first mover active.
    #[instrument(skip(self))]
    pub fn reset(&self) -> Result<(), GameError> {
        dispatch(&self.controller, &self.bus, GameController::reset)??;
        Ok(())
    }

    /// Renames both players.
    ///
    /// Sent as `set-player-names` on the bus, so renderers learn the new
    /// names exactly as they would from a bus request.
    #[instrument(skip(self))]
    pub fn set_player_names(&self, first_name: &str, second_name: &str) -> Result<(), GameError> {
        self.bus.emit(&Event::SetPlayerNames {
            first_name: first_name.to_string(),
            second_name: second_name.to_string(),
        })?;
        Ok(())
    }

    /// Returns the current state.
    pub fn state(&self) -> GameState {
        self.controller.borrow().state().clone()
    }

    /// Returns a snapshot of the board.
    pub fn board(&self) -> Board {
        self.controller.borrow().board().clone()
    }

    /// Returns a snapshot of both players.
    pub fn players(&self) -> Players {
        self.controller.borrow().players().clone()
    }

    /// Returns a copy of the move history.
    pub fn history(&self) -> Vec<Move> {
        self.controller.borrow().history().to_vec()
    }

    /// Returns the empty positions while a move is awaited.
    pub fn valid_moves(&self) -> Vec<usize> {
        self.controller.borrow().valid_moves()
    }
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("bus", &self.bus)
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        for name in [
            EventName::RequestMove,
            EventName::RequestReset,
            EventName::SetPlayerNames,
        ] {
            self.bus.unsubscribe(name, &self.inbound);
        }
        debug!("Game session dropped");
    }
}

/// Runs `op` on the controller, then emits whatever it queued.
///
/// The controller borrow ends before the first handler runs, so handlers may
/// read the session or send further requests.
///
/// Events go out only after the whole transition is applied. A
/// `board-updated` handler therefore already sees the post-move state: the
/// turn has passed, or the game is won or tied. Emission order still follows
/// the order the controller queued them.
fn dispatch<R>(
    controller: &RefCell<GameController>,
    bus: &EventBus,
    op: impl FnOnce(&mut GameController) -> R,
) -> Result<R, EventBusError> {
    let (result, events) = {
        let mut controller = controller.borrow_mut();
        let result = op(&mut controller);
        (result, controller.take_events())
    };

    for event in &events {
        bus.emit(event)?;
    }
    Ok(result)
}

fn inbound_handler(controller: Rc<RefCell<GameController>>, bus: Weak<EventBus>) -> Handler {
    Rc::new(move |event: &Event| {
        let Some(bus) = bus.upgrade() else {
            return;
        };

        let outcome = match event {
            Event::RequestMove { cell_index } => {
                match dispatch(&controller, &bus, |c| c.request_move(*cell_index)) {
                    Ok(Ok(state)) => {
                        debug!(cell_index, state = %state, "Move request handled");
                        Ok(())
                    }
                    Ok(Err(e)) => {
                        warn!(cell_index, error = %e, "Move request rejected");
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }
            Event::RequestReset => match dispatch(&controller, &bus, GameController::reset) {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => {
                    warn!(error = %e, "Reset request rejected");
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Event::SetPlayerNames {
                first_name,
                second_name,
            } => dispatch(&controller, &bus, |c| {
                c.set_player_names(first_name, second_name)
            }),
            _ => Ok(()),
        };

        if let Err(e) = outcome {
            warn!(event = %event.name(), error = %e, "Inbound event not fully delivered");
        }
    })
}
