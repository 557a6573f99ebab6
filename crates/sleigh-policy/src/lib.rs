//! `sleigh-policy` — the decision side of an episode.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                          |
//! |--------------|-------------------------------------------------------------------|
//! | [`context`]  | `PolicyContext<'a>` — read-only view handed to every decision     |
//! | [`policy`]   | `Policy` trait                                                    |
//! | [`float`]    | `FloatPolicy` — always drifts one tick                            |
//! | [`greedy`]   | `GreedyPolicy` — one-gift-at-a-time, unit accelerations           |
//! | [`mission`]  | `MissionPolicy` — batch load, nearest-neighbour route, braking    |
//! | [`planning`] | batch selection, route ordering, and steering helpers             |
//! | [`error`]    | `PolicyError`, `PolicyResult<T>`                                  |
//!
//! # Design notes
//!
//! A policy only *proposes* an [`Action`][sleigh_physics::Action]; the
//! episode driver in `sleigh-run` submits it to the simulator and handles
//! rejections.  Policies therefore never need to be exact: a proposal the
//! simulator refuses costs one fallback float, not a crash.
//!
//! Each episode owns its policy instance, so `decide` takes `&mut self` and
//! policies may keep per-episode plans (see [`MissionPolicy`]).

pub mod context;
pub mod error;
pub mod float;
pub mod greedy;
pub mod mission;
pub mod planning;
pub mod policy;


pub use context::PolicyContext;
pub use error::{PolicyError, PolicyResult};
pub use float::FloatPolicy;
pub use greedy::GreedyPolicy;
pub use mission::{BatchStrategy, MissionConfig, MissionPhase, MissionPolicy};
pub use planning::{
    knapsack_greedy, move_toward, plan_delivery_batch, refuel_amount, sort_route_nearest, thrust,
};
pub use policy::Policy;
