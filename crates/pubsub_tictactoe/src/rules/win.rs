//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Sign, Square};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// Board positions that win when one sign holds all of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Line(Vec<usize>);

impl Line {
    /// Creates a line from explicit positions.
    pub fn new(positions: Vec<usize>) -> Self {
        Self(positions)
    }

    /// Returns the positions on this line.
    pub fn positions(&self) -> &[usize] {
        &self.0
    }

    /// Checks whether every position on the line holds `sign`.
    pub fn is_held_by(&self, board: &Board, sign: Sign) -> bool {
        self.0
            .iter()
            .all(|&pos| board.get(pos) == Some(Square::Occupied(sign)))
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let positions: Vec<String> = self.0.iter().map(usize::to_string).collect();
        write!(f, "[{}]", positions.join(", "))
    }
}

/// Every winning line for a board size, in scan order.
///
/// Rows come first (top to bottom), then columns (left to right), then the
/// main diagonal and the anti-diagonal. The first line held by a sign is the
/// one reported, even if later lines are also complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinLines {
    size: usize,
    lines: Vec<Line>,
}

impl WinLines {
    /// Generates the `2 * size + 2` lines for a `size * size` board.
    #[instrument]
    pub fn for_size(size: usize) -> Self {
        let rows = (0..size).map(|row| Line((0..size).map(|col| row * size + col).collect()));
        let columns = (0..size).map(|col| Line((0..size).map(|row| row * size + col).collect()));
        let main_diagonal = Line((0..size).map(|i| i * size + i).collect());
        let anti_diagonal = Line((0..size).map(|i| i * size + (size - 1 - i)).collect());

        let lines: Vec<Line> = rows
            .chain(columns)
            .chain([main_diagonal, anti_diagonal])
            .collect();

        debug!(size, count = lines.len(), "Generated win lines");
        Self { size, lines }
    }

    /// Returns the board size these lines were generated for.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns all lines in scan order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Returns the first line fully held by `sign`.
    #[instrument(skip(self, board), fields(size = self.size))]
    pub fn first_complete(&self, board: &Board, sign: Sign) -> Option<&Line> {
        self.lines.iter().find(|line| line.is_held_by(board, sign))
    }
}

/// Checks whether `sign` holds a complete line on `board`.
///
/// Returns the first matching line in scan order, or `None`. A `None` on a
/// full board means a tie; fullness is checked separately with
/// [`is_full`](super::is_full).
#[instrument(skip(board), fields(size = board.size()))]
pub fn check_win(board: &Board, sign: Sign) -> Option<Line> {
    if board.size() == 0 {
        return None;
    }
    WinLines::for_size(board.size())
        .first_complete(board, sign)
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(size: usize, marks: &[(usize, Sign)]) -> Board {
        let mut board = Board::empty(size);
        for &(pos, sign) in marks {
            board.place(pos, sign);
        }
        board
    }

    #[test]
    fn test_lines_for_three() {
        let lines = WinLines::for_size(3);
        let positions: Vec<Vec<usize>> = lines
            .lines()
            .iter()
            .map(|line| line.positions().to_vec())
            .collect();
        assert_eq!(
            positions,
            vec![
                vec![0, 1, 2],
                vec![3, 4, 5],
                vec![6, 7, 8],
                vec![0, 3, 6],
                vec![1, 4, 7],
                vec![2, 5, 8],
                vec![0, 4, 8],
                vec![2, 4, 6],
            ]
        );
    }

    #[test]
    fn test_lines_for_four() {
        let lines = WinLines::for_size(4);
        assert_eq!(lines.lines().len(), 10);
        assert_eq!(lines.lines()[8].positions(), &[0, 5, 10, 15]);
        assert_eq!(lines.lines()[9].positions(), &[3, 6, 9, 12]);
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::empty(3);
        assert_eq!(check_win(&board, Sign::X), None);
        assert_eq!(check_win(&board, Sign::O), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_with(3, &[(0, Sign::X), (1, Sign::X), (2, Sign::X)]);
        assert_eq!(check_win(&board, Sign::X), Some(Line::new(vec![0, 1, 2])));
        assert_eq!(check_win(&board, Sign::O), None);
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = board_with(3, &[(2, Sign::O), (4, Sign::O), (6, Sign::O)]);
        assert_eq!(check_win(&board, Sign::O), Some(Line::new(vec![2, 4, 6])));
    }

    #[test]
    fn test_first_match_wins_tie_break() {
        // X holds the top row and the left column; the row is scanned first.
        let board = board_with(
            3,
            &[(0, Sign::X), (1, Sign::X), (2, Sign::X), (3, Sign::X), (6, Sign::X)],
        );
        assert_eq!(check_win(&board, Sign::X), Some(Line::new(vec![0, 1, 2])));
    }

    #[test]
    fn test_column_before_diagonal() {
        let board = board_with(
            3,
            &[(2, Sign::X), (5, Sign::X), (8, Sign::X), (4, Sign::X), (6, Sign::X)],
        );
        assert_eq!(check_win(&board, Sign::X), Some(Line::new(vec![2, 5, 8])));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = board_with(3, &[(0, Sign::X), (1, Sign::X), (2, Sign::O)]);
        assert_eq!(check_win(&board, Sign::X), None);
    }

    #[test]
    fn test_four_by_four_needs_full_line() {
        let three = board_with(4, &[(0, Sign::X), (1, Sign::X), (2, Sign::X)]);
        assert_eq!(check_win(&three, Sign::X), None);

        let four = board_with(4, &[(0, Sign::X), (1, Sign::X), (2, Sign::X), (3, Sign::X)]);
        assert_eq!(check_win(&four, Sign::X), Some(Line::new(vec![0, 1, 2, 3])));
    }

    #[test]
    fn test_line_display() {
        assert_eq!(Line::new(vec![0, 4, 8]).to_string(), "[0, 4, 8]");
    }
}
