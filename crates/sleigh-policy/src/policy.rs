//! The `Policy` trait — the main extension point for solver code.

use sleigh_physics::{Action, SimError, SleighState};

use crate::PolicyContext;

/// Pluggable decision rule for one sleigh.
///
/// Only [`decide`][Self::decide] is required.  The rejection and reset hooks
/// have no-op defaults so stateless policies don't need to implement them.
///
/// # Thread safety
///
/// Batch evaluation may move policies onto Rayon worker threads, so
/// implementations must be `Send`.  They are never shared between episodes.
///
/// # Example
///
/// ```rust,ignore
/// struct AlwaysRefuel;
///
/// impl Policy for AlwaysRefuel {
///     fn name(&self) -> &str { "always-refuel" }
///
///     fn decide(&mut self, state: &SleighState, ctx: &PolicyContext<'_>) -> Action {
///         if ctx.simulator.in_base_range(state) {
///             Action::LoadCarrots(1)
///         } else {
///             Action::FLOAT_ONE
///         }
///     }
/// }
/// ```
pub trait Policy: Send {
    /// Short identifier used in logs and summaries.
    fn name(&self) -> &str;

    /// Propose the next action for `state`.
    ///
    /// The proposal need not be valid; the driver checks it.
    fn decide(&mut self, state: &SleighState, ctx: &PolicyContext<'_>) -> Action;

    /// Called when the simulator refused the last proposal.
    ///
    /// Default: ignored.
    fn on_rejected(&mut self, _action: Action, _error: &SimError, _ctx: &PolicyContext<'_>) {}

    /// Forget any per-episode plan before a new episode starts.
    ///
    /// Default: nothing to forget.
    fn reset(&mut self) {}
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn decide(&mut self, state: &SleighState, ctx: &PolicyContext<'_>) -> Action {
        (**self).decide(state, ctx)
    }

    fn on_rejected(&mut self, action: Action, error: &SimError, ctx: &PolicyContext<'_>) {
        (**self).on_rejected(action, error, ctx)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
