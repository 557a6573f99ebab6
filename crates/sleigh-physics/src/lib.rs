//! `sleigh-physics` — the simulation core.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`accel`]     | `AccelerationTable` — weight → maximum acceleration            |
//! | [`action`]    | `Direction`, `Action` (index-addressed, what policies emit)    |
//! | [`command`]   | `Command` (name-addressed, what action logs contain)           |
//! | [`state`]     | `SleighState` — the single mutable entity of an episode        |
//! | [`simulator`] | `Simulator`, `SimulatorBuilder` — validate and apply actions   |
//! | [`error`]     | `SimError`, `Rejection`, `SimResult<T>`                        |
//!
//! # Transition model
//!
//! ```text
//!            Accelerate                 Float(t)
//!   may accelerate ─────────▶ must float ─────────▶ may accelerate
//!        │  ▲                    │
//!        └──┘ Load / Deliver /   └─ Load / Deliver / LoadCarrots keep the flag
//!             LoadCarrots
//! ```
//!
//! Every transition goes through [`Simulator::apply_action`], which returns a
//! fresh state or an [`SimError::InvalidAction`].  The simulator never falls
//! back to a different action on its own; that is the caller's policy.

pub mod accel;
pub mod action;
pub mod command;
pub mod error;
pub mod simulator;
pub mod state;

#[cfg(test)]
mod tests;

pub use accel::AccelerationTable;
pub use action::{Action, Direction};
pub use command::Command;
pub use error::{ParseCommandError, Rejection, SimError, SimResult};
pub use simulator::{Simulator, SimulatorBuilder};
pub use state::SleighState;
