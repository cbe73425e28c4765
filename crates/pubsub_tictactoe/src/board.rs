//! The live board.
//!
//! [`BoardModel`] owns the only mutable [`Board`]. Readers get a shared
//! reference, and every change is announced through the [`Outbox`].

use crate::config::validate_board_size;
use crate::error::{InvalidConfigurationError, InvalidMoveError};
use crate::events::{Event, Outbox};
use crate::types::{Board, Sign, Square};
use tracing::{debug, info, instrument, warn};

/// Owns the board for one game.
#[derive(Debug, Clone)]
pub struct BoardModel {
    board: Board,
}

impl BoardModel {
    /// Creates an empty board without announcing it.
    #[instrument]
    pub fn new(size: usize) -> Result<Self, InvalidConfigurationError> {
        let size = validate_board_size(size)?;
        Ok(Self {
            board: Board::empty(size),
        })
    }

    /// Replaces the board with `size * size` empty cells and publishes
    /// `board-created` with the new snapshot.
    #[instrument(skip(self, outbox))]
    pub fn create(
        &mut self,
        size: usize,
        outbox: &mut Outbox,
    ) -> Result<(), InvalidConfigurationError> {
        let size = validate_board_size(size)?;
        self.board = Board::empty(size);
        info!(size, "Board created");
        outbox.publish(Event::BoardCreated {
            board: self.board.clone(),
        });
        Ok(())
    }

    /// Returns the current board.
    pub fn get(&self) -> &Board {
        &self.board
    }

    /// Places `sign` at `index` and publishes `board-updated`.
    ///
    /// # Errors
    ///
    /// Rejects indices outside the board and occupied cells; the board is
    /// left unchanged and nothing is published.
    #[instrument(skip(self, outbox), fields(sign = %sign))]
    pub fn update(
        &mut self,
        index: usize,
        sign: Sign,
        outbox: &mut Outbox,
    ) -> Result<(), InvalidMoveError> {
        match self.board.get(index) {
            None => {
                warn!("Update out of bounds");
                Err(InvalidMoveError::OutOfBounds {
                    index,
                    cells: self.board.cell_count(),
                })
            }
            Some(Square::Occupied(existing)) => {
                warn!(existing = %existing, "Update on occupied cell");
                Err(InvalidMoveError::Occupied {
                    index,
                    sign: existing,
                })
            }
            Some(Square::Empty) => {
                self.board.place(index, sign);
                debug!("Cell updated");
                outbox.publish(Event::BoardUpdated { index, sign });
                Ok(())
            }
        }
    }

    /// Test-only direct write that skips validation and events.
    #[cfg(test)]
    pub(crate) fn force(&mut self, index: usize, sign: Sign) {
        self.board.place(index, sign);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventName;

    #[test]
    fn test_create_publishes_snapshot() {
        let mut model = BoardModel::new(3).unwrap();
        let mut outbox = Outbox::new();
        model.create(4, &mut outbox).unwrap();

        assert_eq!(model.get().cell_count(), 16);
        let events = outbox.drain();
        assert_eq!(events.len(), 1);
        match &events[0] {
            Event::BoardCreated { board } => assert_eq!(board, model.get()),
            other => panic!("Expected board-created, got {:?}", other),
        }
    }

    #[test]
    fn test_create_rejects_bad_size() {
        let mut model = BoardModel::new(3).unwrap();
        let mut outbox = Outbox::new();
        assert!(model.create(0, &mut outbox).is_err());
        assert!(outbox.is_empty());
        assert_eq!(model.get().size(), 3);
        assert!(BoardModel::new(1).is_err());
    }

    #[test]
    fn test_update_publishes_index_and_sign() {
        let mut model = BoardModel::new(3).unwrap();
        let mut outbox = Outbox::new();
        model.update(4, Sign::X, &mut outbox).unwrap();

        assert_eq!(model.get().get(4), Some(Square::Occupied(Sign::X)));
        assert_eq!(
            outbox.drain(),
            vec![Event::BoardUpdated {
                index: 4,
                sign: Sign::X
            }]
        );
    }

    #[test]
    fn test_update_occupied_is_rejected() {
        let mut model = BoardModel::new(3).unwrap();
        let mut outbox = Outbox::new();
        model.update(4, Sign::X, &mut outbox).unwrap();
        outbox.drain();

        let err = model.update(4, Sign::O, &mut outbox).unwrap_err();
        assert_eq!(
            err,
            InvalidMoveError::Occupied {
                index: 4,
                sign: Sign::X
            }
        );
        assert_eq!(model.get().get(4), Some(Square::Occupied(Sign::X)));
        assert!(outbox.is_empty());
    }

    #[test]
    fn test_update_out_of_bounds_is_rejected() {
        let mut model = BoardModel::new(3).unwrap();
        let mut outbox = Outbox::new();
        let err = model.update(9, Sign::X, &mut outbox).unwrap_err();
        assert_eq!(err, InvalidMoveError::OutOfBounds { index: 9, cells: 9 });
        assert_eq!(model.get().occupied_count(), 0);
        assert!(outbox.is_empty());
    }

    #[test]
    fn test_create_discards_previous_marks() {
        let mut model = BoardModel::new(5).unwrap();
        let mut outbox = Outbox::new();
        model.update(0, Sign::X, &mut outbox).unwrap();
        model.create(5, &mut outbox).unwrap();

        assert_eq!(model.get().size(), 5);
        assert_eq!(model.get().occupied_count(), 0);
        let names: Vec<EventName> = outbox.drain().iter().map(Event::name).collect();
        assert_eq!(names, vec![EventName::BoardUpdated, EventName::BoardCreated]);
    }
}
