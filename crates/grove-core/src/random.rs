//! Pseudo-random source contract and the seeded default implementation.
//!
//! Two range conventions exist: [`RandomSource::range_int`] is inclusive
//! on both ends and [`RandomSource::range_int_exclusive`] excludes its
//! upper bound. Every draw inside the engine uses the inclusive form, so
//! a configured range `min..=max` is passed through unchanged. The
//! exclusive form is provided for callers porting code written against
//! half-open ranges.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of integer draws for the engine.
///
/// Implementations must be deterministic for a given construction so that
/// a game seeded the same way plays out the same way.
pub trait RandomSource {
    /// Uniform draw in `min..=max_inclusive`.
    ///
    /// If `max_inclusive < min` the range is degenerate and `min` is
    /// returned.
    fn range_int(&mut self, min: i32, max_inclusive: i32) -> i32;

    /// Uniform draw in `min..max_exclusive`.
    ///
    /// If the range is empty, `min` is returned.
    fn range_int_exclusive(&mut self, min: i32, max_exclusive: i32) -> i32 {
        if max_exclusive <= min {
            return min;
        }
        self.range_int(min, max_exclusive - 1)
    }

    /// Fair choice between `-1` and `1`.
    fn sign(&mut self) -> i32 {
        self.range_int(0, 1) * 2 - 1
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn range_int(&mut self, min: i32, max_inclusive: i32) -> i32 {
        (**self).range_int(min, max_inclusive)
    }
}

/// [`RandomSource`] backed by a ChaCha8 stream seeded from a `u64`.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    /// Create a source whose draws are fully determined by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn range_int(&mut self, min: i32, max_inclusive: i32) -> i32 {
        if max_inclusive <= min {
            return min;
        }
        self.rng.random_range(min..=max_inclusive)
    }
}
