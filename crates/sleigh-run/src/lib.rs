//! `sleigh-run` — episode driver for the sleigh simulator.
//!
//! # Episode loop
//!
//! ```text
//! while time < T and gifts remain:
//!   ① Decide   — policy.decide(state, ctx) proposes an action.
//!   ② Clamp    — Float(t) is cut to the ticks left before T.
//!   ③ Apply    — simulator validates and applies it; the name-resolved
//!                command is appended to the CommandLog.
//!   ④ Fallback — on rejection: warn, notify observer and policy, then try
//!                Float(1).  If that is rejected too, the episode ends.
//!   ⑤ Idle     — too many decisions in a row without the clock moving
//!                end the episode as Termination::Idle.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | `evaluate_batch` runs episodes on Rayon's thread pool.   |
//! | `serde`    | `EpisodeSummary` and `Termination` derive serde traits.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sleigh_physics::SimulatorBuilder;
//! use sleigh_policy::GreedyPolicy;
//! use sleigh_run::{EpisodeBuilder, NoopObserver};
//!
//! let sim = SimulatorBuilder::from_problem(problem).build()?;
//! let mut episode = EpisodeBuilder::new(&sim, GreedyPolicy::new()).build()?;
//! let summary = episode.run(&mut NoopObserver)?;
//! ```

pub mod batch;
pub mod builder;
pub mod command_log;
pub mod episode;
pub mod error;
pub mod observer;
pub mod replay;

#[cfg(test)]
mod tests;

pub use batch::evaluate_batch;
pub use builder::{DEFAULT_MAX_IDLE_STEPS, EpisodeBuilder};
pub use command_log::CommandLog;
pub use episode::{Episode, EpisodeSummary, Termination};
pub use error::{RunError, RunResult};
pub use observer::{EpisodeObserver, NoopObserver};
pub use replay::{ReplayOutcome, replay, replay_from};
