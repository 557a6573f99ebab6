//! Actions — the requests a caller submits to the simulator.

use std::fmt;

use sleigh_core::Velocity;

// ── Direction ─────────────────────────────────────────────────────────────────

/// Axis and sign of an acceleration.
///
/// `Up`/`Down` act on the row axis (`vr`), `Left`/`Right` on the column axis
/// (`vc`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Velocity after accelerating by `magnitude` in this direction, or
    /// `None` if the component would leave the `i64` range.
    #[inline]
    pub fn apply(self, v: Velocity, magnitude: u64) -> Option<Velocity> {
        let m = i64::try_from(magnitude).ok()?;
        Some(match self {
            Direction::Up    => Velocity { vr: v.vr.checked_add(m)?, ..v },
            Direction::Down  => Velocity { vr: v.vr.checked_sub(m)?, ..v },
            Direction::Left  => Velocity { vc: v.vc.checked_sub(m)?, ..v },
            Direction::Right => Velocity { vc: v.vc.checked_add(m)?, ..v },
        })
    }

    /// Command-log keyword, e.g. `AccUp`.
    pub fn command_name(self) -> &'static str {
        match self {
            Direction::Up    => "AccUp",
            Direction::Down  => "AccDown",
            Direction::Left  => "AccLeft",
            Direction::Right => "AccRight",
        }
    }

    pub fn from_command_name(name: &str) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.command_name() == name)
    }
}

// ── Action ────────────────────────────────────────────────────────────────────

/// One simulator transition request.
///
/// Gift actions address gifts by position in the state's `available_gifts`
/// (for loading) or `loaded_gifts` (for delivery), so a policy can act
/// without knowing gift names.  [`Command`][crate::Command] is the
/// name-addressed equivalent written to action logs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Change velocity on one axis; burns one carrot.
    Accelerate { direction: Direction, magnitude: u64 },
    /// Drift for the given number of ticks.
    Float(u64),
    /// Move `available_gifts[i]` onto the sleigh.
    LoadGift(usize),
    /// Drop `loaded_gifts[i]` at its destination.
    DeliverGift(usize),
    /// Take on `n` carrots at the base.
    LoadCarrots(u64),
}

impl Action {
    #[inline]
    pub fn accelerate(direction: Direction, magnitude: u64) -> Action {
        Action::Accelerate { direction, magnitude }
    }

    /// The single-tick drift used as the fallback.
    pub const FLOAT_ONE: Action = Action::Float(1);

    #[inline]
    pub fn is_acceleration(&self) -> bool {
        matches!(self, Action::Accelerate { .. })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Accelerate { direction, magnitude } => {
                write!(f, "{} {magnitude}", direction.command_name())
            }
            Action::Float(ticks)    => write!(f, "Float {ticks}"),
            Action::LoadGift(i)     => write!(f, "LoadGift #{i}"),
            Action::DeliverGift(i)  => write!(f, "DeliverGift #{i}"),
            Action::LoadCarrots(n)  => write!(f, "LoadCarrots {n}"),
        }
    }
}
