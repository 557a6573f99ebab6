//! The `Episode` struct and its decision loop.

use log::{debug, info, warn};
use sleigh_core::Tick;
use sleigh_physics::{Action, SimError, Simulator, SleighState};
use sleigh_policy::{Policy, PolicyContext};

use crate::{CommandLog, EpisodeObserver, RunError, RunResult};

// ── Summary ───────────────────────────────────────────────────────────────────

/// Why an episode stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// Every gift was delivered.
    AllDelivered,
    /// The clock reached the time limit.
    TimeLimit,
    /// The configured step cap was reached.
    StepLimit,
    /// Both the proposal and the fallback float were rejected.
    Stuck,
    /// The clock did not move for the configured number of decisions.
    Idle,
}

/// Outcome of one [`Episode::run`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpisodeSummary {
    pub policy:       String,
    pub termination:  Termination,
    /// Decisions requested from the policy.
    pub steps:        u64,
    /// Commands applied, fallbacks and initial fuel included.
    pub applied:      u64,
    /// Proposals the simulator refused.
    pub rejected:     u64,
    pub final_time:   Tick,
    pub score:        u64,
    pub delivered:    usize,
    pub total_gifts:  usize,
    pub carrots_left: u64,
}

// ── Episode ───────────────────────────────────────────────────────────────────

/// One sleigh, one policy, one pass over the time budget.
///
/// The simulator is borrowed; the state, policy, and command log are owned.
/// Create via [`EpisodeBuilder`][crate::EpisodeBuilder].
pub struct Episode<'s, P: Policy> {
    pub(crate) simulator:    &'s Simulator,
    pub(crate) policy:       P,
    pub(crate) state:        SleighState,
    pub(crate) log:          CommandLog,
    pub(crate) pending_fuel: u64,
    pub(crate) max_steps:    Option<u64>,
    pub(crate) max_idle:     u64,
    pub(crate) idle_steps:   u64,
    pub(crate) steps:        u64,
    pub(crate) rejected:     u64,
}

impl<'s, P: Policy> Episode<'s, P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Drive the policy until the time limit, full delivery, the step cap,
    /// too many decisions without the clock moving, or an unrecoverable
    /// rejection.
    ///
    /// Calls observer hooks at every step.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: EpisodeObserver>(&mut self, observer: &mut O) -> RunResult<EpisodeSummary> {
        observer.on_episode_start(&self.state);

        if self.pending_fuel > 0 {
            let fuel = Action::LoadCarrots(self.pending_fuel);
            self.apply(fuel, observer)?;
            self.pending_fuel = 0;
        }

        let termination = loop {
            if self.state.all_delivered() {
                break Termination::AllDelivered;
            }
            if self.state.current_time >= self.simulator.time_limit() {
                break Termination::TimeLimit;
            }
            if self.max_steps.is_some_and(|cap| self.steps >= cap) {
                break Termination::StepLimit;
            }
            if self.idle_steps >= self.max_idle {
                warn!("clock stuck at {} for {} decisions", self.state.current_time, self.idle_steps);
                break Termination::Idle;
            }

            let before = self.state.current_time;
            if !self.step(observer) {
                break Termination::Stuck;
            }
            if self.state.current_time > before {
                self.idle_steps = 0;
            } else {
                self.idle_steps += 1;
            }
        };

        self.simulator
            .check_invariants(&self.state)
            .map_err(RunError::Invariant)?;

        let summary = self.summary(termination);
        info!(
            "{}: {:?} after {} steps at {}, score {}, delivered {}/{}, {} rejected",
            summary.policy,
            summary.termination,
            summary.steps,
            summary.final_time,
            summary.score,
            summary.delivered,
            summary.total_gifts,
            summary.rejected,
        );
        observer.on_episode_end(&summary, &self.state);
        Ok(summary)
    }

    /// The current state.
    pub fn state(&self) -> &SleighState {
        &self.state
    }

    /// Commands applied so far.
    pub fn log(&self) -> &CommandLog {
        &self.log
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn simulator(&self) -> &'s Simulator {
        self.simulator
    }

    /// Consume the episode, keeping the final state and its command log.
    pub fn into_parts(self) -> (SleighState, CommandLog) {
        (self.state, self.log)
    }

    // ── Core step processing ──────────────────────────────────────────────

    /// One decision.  Returns `false` if neither the proposal nor the
    /// fallback could be applied.
    fn step<O: EpisodeObserver>(&mut self, observer: &mut O) -> bool {
        let step = self.steps;
        self.steps += 1;

        let ctx = PolicyContext::new(self.simulator, step);
        let decided = self.policy.decide(&self.state, &ctx);
        let proposed = self.clamp(decided);

        let Err(err) = self.apply(proposed, observer) else {
            return true;
        };

        warn!("step {step}: {err}; falling back to {}", Action::FLOAT_ONE);
        self.rejected += 1;
        observer.on_rejected(step, proposed, &err);
        self.policy.on_rejected(proposed, &err, &ctx);

        match self.apply(Action::FLOAT_ONE, observer) {
            Ok(()) => true,
            Err(err) => {
                warn!("step {step}: fallback rejected ({err}); ending episode");
                false
            }
        }
    }

    /// Cut a float to the ticks left before the time limit.
    fn clamp(&self, action: Action) -> Action {
        match action {
            Action::Float(ticks) => {
                let left = self.state.current_time.remaining_until(self.simulator.time_limit());
                Action::Float(ticks.min(left.max(1)))
            }
            other => other,
        }
    }

    /// Validate, apply, record, and report one action.
    fn apply<O: EpisodeObserver>(&mut self, action: Action, observer: &mut O) -> Result<(), SimError> {
        let command = self.simulator.to_command(&self.state, action)?;
        self.simulator.apply_action_in_place(&mut self.state, action)?;

        debug!(
            "{} {command}: pos {} vel {} weight {} carrots {}",
            self.state.current_time,
            self.state.position,
            self.state.velocity,
            self.state.sleigh_weight,
            self.state.carrot_count,
        );
        let score = self.simulator.score(&self.state);
        observer.on_action(self.log.len(), &command, &self.state, score);
        self.log.push(command);
        Ok(())
    }

    fn summary(&self, termination: Termination) -> EpisodeSummary {
        EpisodeSummary {
            policy:       self.policy.name().to_owned(),
            termination,
            steps:        self.steps,
            applied:      self.log.len() as u64,
            rejected:     self.rejected,
            final_time:   self.state.current_time,
            score:        self.simulator.score(&self.state),
            delivered:    self.state.delivered_gifts.len(),
            total_gifts:  self.simulator.catalog().len(),
            carrots_left: self.state.carrot_count,
        }
    }
}
