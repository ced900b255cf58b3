//! Board coordinates.
//!
//! Positions are plain `(x, y)` pairs on a rectangular grid: `x` grows to the
//! right (east), `y` grows downward (south). Coordinates are signed so that a
//! caller handing us something off the board can be told so instead of
//! wrapping around.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate on the grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Position {
    /// Column (increases going east)
    pub x: i32,
    /// Row (increases going south)
    pub y: i32,
}

impl Position {
    /// Create a new position
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance (|dx| + |dy|) to another position
    pub fn manhattan_distance(&self, other: &Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
