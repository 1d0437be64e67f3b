//! Item (candy) placement.
//!
//! Items are drawn from `[0, grid_size - 1)` on both axes, so the last row
//! and column never receive one. That range is kept for compatibility with
//! the classic game.

use rand::{seq::SliceRandom, Rng};

use crate::error::{GameError, Result};
use crate::grid::{Coordinate, GridInt};
use crate::snake::Snake;

/// Random draws made before falling back to scanning the free cells.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 256;

/// Picks a cell in the sampling region that `snake` does not occupy.
///
/// Sampling is retried up to [`MAX_PLACEMENT_ATTEMPTS`] times; after that a
/// uniformly random free cell is chosen from the full list. Fails with
/// [`GameError::ImpossibleItemPlacement`] when every cell is taken, so the
/// call always terminates.
pub fn place<R: Rng>(grid_size: GridInt, snake: &Snake, rng: &mut R) -> Result<Coordinate> {
    let max = grid_size - 1;
    let impossible = || GameError::ImpossibleItemPlacement { grid_size, occupied: snake.len() };

    if max <= 0 {
        return Err(impossible());
    }

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = Coordinate::new(rng.gen_range(0..max), rng.gen_range(0..max));
        if !snake.contains(&candidate) {
            return Ok(candidate);
        }
    }

    let choices: Vec<Coordinate> = (0..max)
        .flat_map(|y| (0..max).map(move |x| Coordinate::new(x, y)))
        .filter(|cell| !snake.contains(cell))
        .collect();

    choices.choose(rng).copied().ok_or_else(impossible)
}
