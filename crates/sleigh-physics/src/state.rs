//! Per-episode sleigh state.

use sleigh_core::{Coordinate, Tick, Velocity};
use sleigh_problem::GiftCatalog;

/// The complete mutable state of one episode.
///
/// A state is owned by exactly one caller.  The simulator reads it and
/// returns a new one; nothing else writes to it.  `Clone` produces a fully
/// independent copy, so speculative callers can branch freely.
///
/// # Invariants (maintained by [`Simulator`][crate::Simulator])
///
/// - Every catalog gift name is in exactly one of `available_gifts`,
///   `loaded_gifts`, `delivered_gifts`.
/// - `sleigh_weight == hull_weight + Σ weight(loaded) + carrot_count`;
///   carrots weigh one unit each.
/// - `current_time` never decreases and never passes the time limit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SleighState {
    /// Elapsed ticks.
    pub current_time: Tick,

    pub position: Coordinate,

    pub velocity: Velocity,

    /// Hull + loaded gifts + carried carrots.
    pub sleigh_weight: u64,

    /// Remaining fuel.  Each acceleration burns exactly one.
    pub carrot_count: u64,

    /// Gifts still waiting at the base, in catalog order minus loaded ones.
    pub available_gifts: Vec<String>,

    /// Gifts on the sleigh, in load order.
    pub loaded_gifts: Vec<String>,

    /// Gifts dropped off, in delivery order.
    pub delivered_gifts: Vec<String>,

    /// `true` right after an acceleration; the next movement must be a float.
    pub last_action_was_acceleration: bool,
}

impl SleighState {
    /// The start-of-episode state: at `base`, at rest, every gift available.
    ///
    /// `carrots` is capped so that `hull_weight + carrots` fits in a `u64`.
    pub fn initial(catalog: &GiftCatalog, base: Coordinate, hull_weight: u64, carrots: u64) -> Self {
        let carrots = carrots.min(u64::MAX - hull_weight);
        Self {
            current_time:                 Tick::ZERO,
            position:                     base,
            velocity:                     Velocity::ZERO,
            sleigh_weight:                hull_weight + carrots,
            carrot_count:                 carrots,
            available_gifts:              catalog.names(),
            loaded_gifts:                 Vec::new(),
            delivered_gifts:              Vec::new(),
            last_action_was_acceleration: false,
        }
    }

    /// `true` if the next action may not be an acceleration.
    #[inline]
    pub fn must_float(&self) -> bool {
        self.last_action_was_acceleration
    }

    /// `true` once nothing is left to load or deliver.
    #[inline]
    pub fn all_delivered(&self) -> bool {
        self.available_gifts.is_empty() && self.loaded_gifts.is_empty()
    }

    pub fn available_index(&self, name: &str) -> Option<usize> {
        self.available_gifts.iter().position(|g| g == name)
    }

    pub fn loaded_index(&self, name: &str) -> Option<usize> {
        self.loaded_gifts.iter().position(|g| g == name)
    }

    /// Total gifts tracked by this state across all three lists.
    pub fn gift_count(&self) -> usize {
        self.available_gifts.len() + self.loaded_gifts.len() + self.delivered_gifts.len()
    }
}
