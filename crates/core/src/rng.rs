//! RNG module - seeded random source for round generation
//!
//! Every generator takes its randomness from a [`QuizRng`], so a session
//! created with the same seed produces the same questions and grids.
//! Backed by PCG32, which is small, fast and stable across platforms.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Seedable random source injected into the generators
#[derive(Debug, Clone)]
pub struct QuizRng {
    seed: u64,
    inner: Pcg32,
}

impl QuizRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.inner.random()
    }

    /// Uniform value in `[lo, hi]` (both inclusive). Returns `lo` if the range is empty.
    pub fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.inner.random_range(lo..=hi)
    }

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.inner.random_range(0..len)
    }

    /// Shuffle a slice in place (Fisher-Yates)
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// The seed this RNG was created with (for replaying a session)
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for QuizRng {
    fn default() -> Self {
        Self::new(1)
    }
}
