//! Game rules for tic-tac-toe.
//!
//! Pure functions over board contents, with no mutation and no I/O.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{Line, WinLines, check_win};
