//! The `Problem` aggregate handed to the simulator.

use sleigh_core::Tick;

use crate::{AccelerationRange, GiftCatalog};

/// A fully loaded problem instance.
///
/// Field names follow the problem-file header `T D W G`: `time_limit` is `T`,
/// `range` is `D`, `ranges.len()` is `W`, and `catalog.len()` is `G`.
#[derive(Clone, Debug)]
pub struct Problem {
    /// Total ticks available to the sleigh.
    pub time_limit: Tick,
    /// Maximum distance at which the sleigh can load, refuel, or deliver.
    pub range:      u64,
    /// Acceleration bands in ascending weight order.
    pub ranges:     Vec<AccelerationRange>,
    /// Every gift in the problem.
    pub catalog:    GiftCatalog,
}

impl Problem {
    /// The `(T, D, W, G)` header values.
    pub fn header(&self) -> (u64, u64, usize, usize) {
        (self.time_limit.0, self.range, self.ranges.len(), self.catalog.len())
    }
}
