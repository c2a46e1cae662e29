//! Grid Hunt round generation
//!
//! A round asks for `base × factor`; the grid holds every multiple
//! `base × 1 ..= base × 12` in shuffled order, so the product is always on it.

use crate::rng::QuizRng;
use crate::types::{GRID_BASE_MAX, GRID_BASE_MIN, GRID_FACTOR_MAX, GRID_FACTOR_MIN, GRID_SIZE};

/// One Grid Hunt challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridRound {
    pub base: i32,
    pub factor: i32,
    pub product: i32,
    pub grid: [i32; GRID_SIZE],
}

impl GridRound {
    /// Build a round with the grid in ascending order.
    pub fn ordered(base: i32, factor: i32) -> Self {
        let mut grid = [0; GRID_SIZE];
        for (i, cell) in grid.iter_mut().enumerate() {
            *cell = base * (i as i32 + 1);
        }
        Self {
            base,
            factor,
            product: base * factor,
            grid,
        }
    }

    pub fn is_correct(&self, choice: i32) -> bool {
        choice == self.product
    }
}

/// Generate a fresh Grid Hunt round.
pub fn generate_grid_round(rng: &mut QuizRng) -> GridRound {
    let base = rng.range_inclusive(GRID_BASE_MIN, GRID_BASE_MAX);
    let factor = rng.range_inclusive(GRID_FACTOR_MIN, GRID_FACTOR_MAX);
    let mut round = GridRound::ordered(base, factor);
    rng.shuffle(&mut round.grid);
    round
}
