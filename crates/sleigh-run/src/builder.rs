//! Fluent builder for constructing an [`Episode`].

use sleigh_physics::Simulator;
use sleigh_policy::Policy;

use crate::{CommandLog, Episode, RunError, RunResult};

/// Fluent builder for [`Episode<P>`].
///
/// # Required inputs
///
/// - `&Simulator` — shared, read-only problem environment
/// - `P: Policy` — the decision rule, owned by the episode
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                              |
/// |----------------------|--------------------------------------|
/// | `.initial_fuel(n)`   | `0` — start with no carrots          |
/// | `.max_steps(n)`      | unlimited (bounded by the time limit) |
/// | `.max_idle_steps(n)` | [`DEFAULT_MAX_IDLE_STEPS`]            |
///
/// # Example
///
/// ```rust,ignore
/// let mut episode = EpisodeBuilder::new(&sim, MissionPolicy::new())
///     .initial_fuel(30)
///     .max_steps(10_000)
///     .build()?;
/// let summary = episode.run(&mut NoopObserver)?;
/// ```
pub struct EpisodeBuilder<'s, P: Policy> {
    simulator:    &'s Simulator,
    policy:       P,
    initial_fuel: u64,
    max_steps:    Option<u64>,
    max_idle:     u64,
}

/// Consecutive decisions allowed without the clock advancing.
pub const DEFAULT_MAX_IDLE_STEPS: u64 = 10_000;

impl<'s, P: Policy> EpisodeBuilder<'s, P> {
    /// Create a builder with all required inputs.
    pub fn new(simulator: &'s Simulator, policy: P) -> Self {
        Self {
            simulator,
            policy,
            initial_fuel: 0,
            max_steps:    None,
            max_idle:     DEFAULT_MAX_IDLE_STEPS,
        }
    }

    /// Carrots to take on before the first decision.
    ///
    /// Applied as a logged `LoadCarrots` command at the base, so the command
    /// log of the episode still replays from a fuel-less start.
    pub fn initial_fuel(mut self, carrots: u64) -> Self {
        self.initial_fuel = carrots;
        self
    }

    /// Stop after this many policy decisions even if time remains.
    pub fn max_steps(mut self, steps: u64) -> Self {
        self.max_steps = Some(steps);
        self
    }

    /// End the episode as [`Termination::Idle`][crate::Termination::Idle]
    /// after this many decisions in a row leave the clock where it was.
    pub fn max_idle_steps(mut self, steps: u64) -> Self {
        self.max_idle = steps;
        self
    }

    /// Validate inputs and return a ready-to-run [`Episode`].
    pub fn build(self) -> RunResult<Episode<'s, P>> {
        if self.max_steps == Some(0) {
            return Err(RunError::Config("max_steps must be at least 1".into()));
        }
        if self.max_idle == 0 {
            return Err(RunError::Config("max_idle_steps must be at least 1".into()));
        }

        let mut policy = self.policy;
        policy.reset();

        Ok(Episode {
            simulator:    self.simulator,
            policy,
            state:        self.simulator.initial_state(),
            log:          CommandLog::new(),
            pending_fuel: self.initial_fuel,
            max_steps:    self.max_steps,
            max_idle:     self.max_idle,
            idle_steps:   0,
            steps:        0,
            rejected:     0,
        })
    }
}
