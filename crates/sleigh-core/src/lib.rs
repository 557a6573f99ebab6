//! `sleigh-core` — foundational types for the sleigh delivery simulator.
//!
//! This crate is a dependency of every other `sleigh-*` crate.  It has no
//! `sleigh-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`geo`]    | `Coordinate`, `Velocity`, `distance`, braking helpers      |
//! | [`time`]   | `Tick`                                                     |
//! | [`rng`]    | `SimRng` (seeded, deterministic)                           |
//! | [`error`]  | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Coordinate, Velocity, braking_signal, distance, stopping_distance};
pub use rng::SimRng;
pub use time::Tick;
