//! A policy that never acts — the sleigh only drifts.

use sleigh_physics::{Action, SleighState};

use crate::{Policy, PolicyContext};

/// A [`Policy`] that always proposes `Float(1)`.
///
/// Useful as a baseline and as a placeholder in tests: it can never be
/// rejected before the time limit, so an episode driven by it runs exactly
/// `T` steps.
pub struct FloatPolicy;

impl Policy for FloatPolicy {
    fn name(&self) -> &str {
        "float"
    }

    fn decide(&mut self, _state: &SleighState, _ctx: &PolicyContext<'_>) -> Action {
        Action::FLOAT_ONE
    }
}
