//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter starting at zero.  One
//! tick is one `Float` step: the sleigh drifts by its velocity once.  A
//! problem's time limit `T` caps the clock: the simulator accepts a float
//! only if the clock lands at or before `T`.

use std::fmt;

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick `n` floats after `self`; `None` on overflow.
    #[inline]
    pub fn checked_offset(self, n: u64) -> Option<Tick> {
        self.0.checked_add(n).map(Tick)
    }

    /// Ticks left before `limit`; zero once `limit` has been reached.
    #[inline]
    pub fn remaining_until(self, limit: Tick) -> u64 {
        limit.0.saturating_sub(self.0)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
