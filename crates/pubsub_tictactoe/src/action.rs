//! First-class move records.

use crate::types::Sign;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A sign placed at a cell index. Accepted moves are kept as game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// Cell index in row-major order.
    pub index: usize,
    /// The sign placed.
    pub sign: Sign,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.sign, self.index)
    }
}
