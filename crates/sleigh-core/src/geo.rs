//! Plane geometry for the sleigh simulation.
//!
//! Positions and velocities live on an integer grid: accelerations are whole
//! units and time advances in whole ticks, so every kinematic update is exact.
//! Only distances are real-valued.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Fraction of the remaining distance at which [`braking_signal`] fires.
///
/// Less than 1.0 because a discrete-time sleigh overshoots a continuous
/// stopping curve by up to one tick of travel.
const BRAKING_THRESHOLD: f64 = 0.9;

// ── Coordinate ────────────────────────────────────────────────────────────────

/// A position on the plane: column `c` (x axis) and row `r` (y axis).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub c: i64,
    pub r: i64,
}

impl Coordinate {
    /// The base ("Lapland") in every standard problem.
    pub const ORIGIN: Coordinate = Coordinate { c: 0, r: 0 };

    #[inline]
    pub const fn new(c: i64, r: i64) -> Self {
        Self { c, r }
    }

    /// `true` if `other` lies within `range` (inclusive) of `self`.
    #[inline]
    pub fn within(self, other: Coordinate, range: f64) -> bool {
        distance(self, other) <= range
    }

    /// Position after drifting at `velocity` for `ticks` ticks; `None` if
    /// either axis leaves the `i64` grid.
    pub fn checked_drift(self, velocity: Velocity, ticks: u64) -> Option<Coordinate> {
        // i64 * u64 always fits in i128; only the final sum can overflow.
        let axis = |p: i64, v: i64| {
            let moved = (v as i128).checked_mul(ticks as i128)?.checked_add(p as i128)?;
            i64::try_from(moved).ok()
        };
        Some(Coordinate { c: axis(self.c, velocity.vc)?, r: axis(self.r, velocity.vr)? })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.c, self.r)
    }
}

/// Parses `"c,r"` (whitespace around either number is ignored).
impl FromStr for Coordinate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (c, r) = s
            .split_once(',')
            .ok_or_else(|| CoreError::Parse(format!("expected \"c,r\", got {s:?}")))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<i64>()
                .map_err(|e| CoreError::Parse(format!("invalid coordinate component {part:?}: {e}")))
        };
        Ok(Coordinate::new(parse(c)?, parse(r)?))
    }
}

// ── Velocity ──────────────────────────────────────────────────────────────────

/// Per-axis velocity in grid units per tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Velocity {
    pub vc: i64,
    pub vr: i64,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { vc: 0, vr: 0 };

    #[inline]
    pub const fn new(vc: i64, vr: i64) -> Self {
        Self { vc, vr }
    }

    /// Component of this velocity along the direction from `from` to `to`.
    ///
    /// Positive when moving towards `to`; `0.0` when the points coincide.
    pub fn towards(self, from: Coordinate, to: Coordinate) -> f64 {
        let dist = distance(from, to);
        if dist == 0.0 {
            return 0.0;
        }
        let dc = (to.c as f64 - from.c as f64) / dist;
        let dr = (to.r as f64 - from.r as f64) / dist;
        self.vc as f64 * dc + self.vr as f64 * dr
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.vc, self.vr)
    }
}

// ── Free functions ────────────────────────────────────────────────────────────

/// Euclidean distance between two coordinates.
#[inline]
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let dc = a.c as f64 - b.c as f64;
    let dr = a.r as f64 - b.r as f64;
    (dc * dc + dr * dr).sqrt()
}

/// Advisory "must brake now" signal for planners.
///
/// Returns `1` when the continuous stopping distance `v² / (2a)` has reached
/// 90 % of the remaining distance `dist`, `0` otherwise.  Always `0` when the
/// sleigh is not closing on the target or cannot accelerate at all.
pub fn braking_signal(dist: f64, velocity_towards_target: f64, max_accel: u64) -> u8 {
    if velocity_towards_target <= 0.0 || max_accel == 0 {
        return 0;
    }
    let v = velocity_towards_target;
    let stopping = (v * v) / (2.0 * max_accel as f64);
    u8::from(stopping >= BRAKING_THRESHOLD * dist)
}

/// Distance covered while braking from `velocity` to rest one unit per tick.
///
/// `|v| + (|v| - 1) + … + 1 = |v|(|v| + 1) / 2`, saturating at `i64::MAX`.
#[inline]
pub fn stopping_distance(velocity: i64) -> i64 {
    let v = velocity.unsigned_abs();
    let steps = if v % 2 == 0 { (v / 2).checked_mul(v + 1) } else { v.checked_mul((v + 1) / 2) };
    steps.and_then(|d| i64::try_from(d).ok()).unwrap_or(i64::MAX)
}
