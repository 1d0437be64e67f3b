//! Coordinate math for the toroidal playfield.

use serde::{Deserialize, Serialize};

/// Cell index type. Signed so a step off the left or top edge can be
/// represented before it is wrapped back onto the grid.
pub type GridInt = i32;

/// A cell on the grid. Both components live in `[0, grid_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: GridInt,
    pub y: GridInt,
}

impl Coordinate {
    pub const fn new(x: GridInt, y: GridInt) -> Self {
        Coordinate { x, y }
    }

    /// Neighbouring cell one step along `(dx, dy)`, wrapped onto the grid.
    pub fn offset(self, dx: GridInt, dy: GridInt, size: GridInt) -> Self {
        Coordinate::new(wrap(self.x + dx, size), wrap(self.y + dy, size))
    }
}

impl From<(GridInt, GridInt)> for Coordinate {
    fn from((x, y): (GridInt, GridInt)) -> Self {
        Coordinate::new(x, y)
    }
}

/// Folds `value` into `[0, size)`. One past either edge re-enters from the
/// opposite side.
pub fn wrap(value: GridInt, size: GridInt) -> GridInt {
    value.rem_euclid(size)
}

/// Component-wise equality.
pub fn equals(a: &Coordinate, b: &Coordinate) -> bool {
    a.x == b.x && a.y == b.y
}
