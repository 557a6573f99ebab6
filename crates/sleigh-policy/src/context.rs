//! Read-only episode view passed to every policy decision.

use sleigh_physics::Simulator;

/// What a [`Policy`][crate::Policy] may consult besides the state itself.
///
/// Built by the episode driver once per step.  The simulator is borrowed
/// immutably, so a policy can query band caps, ranges, and gift data but can
/// never apply an action on its own.
pub struct PolicyContext<'a> {
    /// The problem environment and transition rules.
    pub simulator: &'a Simulator,

    /// Zero-based index of the decision within the episode.
    pub step: u64,
}

impl<'a> PolicyContext<'a> {
    #[inline]
    pub fn new(simulator: &'a Simulator, step: u64) -> Self {
        Self { simulator, step }
    }
}
