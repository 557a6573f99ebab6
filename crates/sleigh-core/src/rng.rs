//! Seeded randomness for problem generation.
//!
//! The simulator never draws random numbers.  Only generators and
//! exploratory callers do, and each of them takes a `SimRng` built from a
//! `u64` seed so an instance can be regenerated from its seed alone.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::Coordinate;

/// Deterministic random source for generators.
///
/// Not shared between threads; build one per worker from its own seed.
pub struct SimRng {
    rng: SmallRng,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed) }
    }

    /// Uniform pick from `items`; `None` when it is empty.
    #[inline]
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Uniform offset in `-amount..=amount`.  A negative `amount` is
    /// treated as its absolute value.
    #[inline]
    pub fn jitter(&mut self, amount: i64) -> i64 {
        let amount = amount.saturating_abs();
        self.rng.gen_range(-amount..=amount)
    }

    /// A point within `jitter` cells of `centre` on each axis.
    pub fn scatter(&mut self, centre: Coordinate, jitter: i64) -> Coordinate {
        let dc = self.jitter(jitter);
        let dr = self.jitter(jitter);
        Coordinate::new(centre.c.saturating_add(dc), centre.r.saturating_add(dr))
    }
}
