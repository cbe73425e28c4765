//! Core domain types for tic-tac-toe.

use crate::error::InvalidBoardError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The mark a player leaves on the board.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sign(char);

impl Sign {
    /// The conventional first sign.
    pub const X: Sign = Sign('X');
    /// The conventional second sign.
    pub const O: Sign = Sign('O');

    /// Creates a sign from a single character.
    pub const fn new(mark: char) -> Self {
        Self(mark)
    }

    /// Returns the character for this sign.
    pub const fn as_char(self) -> char {
        self.0
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a sign.
    Occupied(Sign),
}

impl Square {
    /// Returns the occupying sign, if any.
    pub fn sign(self) -> Option<Sign> {
        match self {
            Square::Empty => None,
            Square::Occupied(sign) => Some(sign),
        }
    }
}

/// Square board of `size * size` cells in row-major order.
///
/// Values of this type are snapshots: the live board belongs to
/// [`BoardModel`](crate::BoardModel) and is only handed out by reference
/// or as a copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size: usize,
    squares: Vec<Square>,
}

/// Wire form of [`Board`], checked before it becomes one.
#[derive(Deserialize)]
struct RawBoard {
    size: usize,
    squares: Vec<Square>,
}

impl TryFrom<RawBoard> for Board {
    type Error = InvalidBoardError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        if raw.size.checked_mul(raw.size) != Some(raw.squares.len()) {
            return Err(InvalidBoardError {
                size: raw.size,
                squares: raw.squares.len(),
            });
        }
        Ok(Self {
            size: raw.size,
            squares: raw.squares,
        })
    }
}

impl Board {
    /// Creates an empty board with `size * size` cells.
    pub(crate) fn empty(size: usize) -> Self {
        Self {
            size,
            squares: vec![Square::Empty; size * size],
        }
    }

    /// Returns the side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of cells.
    pub fn cell_count(&self) -> usize {
        self.squares.len()
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Counts squares holding a sign.
    pub fn occupied_count(&self) -> usize {
        self.squares
            .iter()
            .filter(|s| **s != Square::Empty)
            .count()
    }

    /// Returns the positions that are still empty, in ascending order.
    pub fn empty_positions(&self) -> Vec<usize> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == Square::Empty)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Writes `sign` into `pos`. Callers validate bounds and occupancy first.
    pub(crate) fn place(&mut self, pos: usize, sign: Sign) {
        if let Some(square) = self.squares.get_mut(pos) {
            *square = Square::Occupied(sign);
        }
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their 1-based cell number so a player can type it.
    pub fn display(&self) -> String {
        let width = self.cell_count().to_string().len();
        let separator = vec!["-".repeat(width); self.size].join("+");

        let mut result = String::new();
        for row in 0..self.size {
            for col in 0..self.size {
                let pos = row * self.size + col;
                let symbol = match self.get(pos) {
                    Some(Square::Occupied(sign)) => sign.to_string(),
                    _ => (pos + 1).to_string(),
                };
                result.push_str(&format!("{symbol:>width$}"));
                if col + 1 < self.size {
                    result.push('|');
                }
            }
            if row + 1 < self.size {
                result.push('\n');
                result.push_str(&separator);
                result.push('\n');
            }
        }
        result
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board() {
        let board = Board::empty(3);
        assert_eq!(board.cell_count(), 9);
        assert_eq!(board.occupied_count(), 0);
        assert!(board.is_empty(8));
        assert!(!board.is_empty(9));
        assert_eq!(board.get(9), None);
    }

    #[test]
    fn test_place_and_count() {
        let mut board = Board::empty(3);
        board.place(0, Sign::X);
        board.place(4, Sign::O);
        board.place(8, Sign::X);

        assert_eq!(board.occupied_count(), 3);
        assert_eq!(board.get(4), Some(Square::Occupied(Sign::O)));
        assert_eq!(board.empty_positions(), vec![1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_display_three_by_three() {
        let mut board = Board::empty(3);
        board.place(0, Sign::X);
        board.place(4, Sign::O);
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_display_pads_wide_boards() {
        let board = Board::empty(4);
        let rendered = board.display();
        assert!(rendered.starts_with(" 1| 2| 3| 4\n--+--+--+--\n"));
        assert!(rendered.ends_with("13|14|15|16"));
    }

    #[test]
    fn test_board_json_round_trip() {
        let mut board = Board::empty(3);
        board.place(4, Sign::X);
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn test_board_with_wrong_square_count_rejected() {
        let err = serde_json::from_str::<Board>(r#"{"size":3,"squares":["Empty","Empty"]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Board of size 3 cannot hold 2 squares"));
    }

    #[test]
    fn test_board_with_overflowing_size_rejected() {
        let json = format!(r#"{{"size":{},"squares":[]}}"#, usize::MAX);
        assert!(serde_json::from_str::<Board>(&json).is_err());
    }

    #[test]
    fn test_sign_serializes_as_string() {
        let json = serde_json::to_string(&Sign::X).unwrap();
        assert_eq!(json, "\"X\"");
    }
}
