//! Travel direction along a line's station sequence.

use std::fmt;

/// Which way a train walks its line's station sequence.
///
/// `Forward` follows the sequence as declared (toward the terminal
/// station); `Backward` walks it in reverse (toward the starting station).
/// A train flips direction exactly once per terminus arrival, never
/// mid-link.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// The opposite direction.
    #[inline]
    pub fn flipped(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Flip in place.
    #[inline]
    pub fn flip(&mut self) {
        *self = self.flipped();
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}
