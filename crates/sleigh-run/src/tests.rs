//! Integration tests for sleigh-run.

use sleigh_core::{Coordinate, Tick};
use sleigh_physics::{Action, Command, SimError, Simulator, SimulatorBuilder, SleighState};
use sleigh_policy::{FloatPolicy, GreedyPolicy, MissionPolicy, Policy, PolicyContext};
use sleigh_problem::{Gift, GiftCatalog, ranges_from_limits};

use crate::{
    DEFAULT_MAX_IDLE_STEPS, EpisodeBuilder, EpisodeObserver, EpisodeSummary, NoopObserver, RunError,
    Termination,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// One band up to weight 100, range 3, one gift "Tom" (score 7) at (10, 0).
fn lone_gift_sim(time_limit: u64) -> Simulator {
    let catalog = GiftCatalog::new(vec![Gift::new("Tom", 7, 5, Coordinate::new(10, 0))]).unwrap();
    SimulatorBuilder::new(Tick(time_limit), 3, ranges_from_limits(&[(100, 8)]), catalog)
        .build()
        .unwrap()
}

/// Always proposes the same action.
struct Stubborn(Action);

impl Policy for Stubborn {
    fn name(&self) -> &str {
        "stubborn"
    }

    fn decide(&mut self, _state: &SleighState, _ctx: &PolicyContext<'_>) -> Action {
        self.0
    }
}

/// Observer that counts every callback.
#[derive(Default)]
struct Counter {
    starts:   usize,
    actions:  usize,
    rejected: usize,
    ends:     usize,
}

impl EpisodeObserver for Counter {
    fn on_episode_start(&mut self, _s: &SleighState) { self.starts += 1; }
    fn on_action(&mut self, _i: usize, _c: &Command, _s: &SleighState, _score: u64) { self.actions += 1; }
    fn on_rejected(&mut self, _step: u64, _a: Action, _e: &SimError) { self.rejected += 1; }
    fn on_episode_end(&mut self, _sum: &EpisodeSummary, _s: &SleighState) { self.ends += 1; }
}

// ── EpisodeBuilder validation ─────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_successfully_with_defaults() {
        let sim = lone_gift_sim(10);
        let episode = EpisodeBuilder::new(&sim, FloatPolicy).build().unwrap();
        assert_eq!(episode.state(), &sim.initial_state());
        assert!(episode.log().is_empty());
    }

    #[test]
    fn zero_step_cap_errors() {
        let sim = lone_gift_sim(10);
        let result = EpisodeBuilder::new(&sim, FloatPolicy).max_steps(0).build();
        assert!(matches!(result, Err(RunError::Config(_))));
    }

    #[test]
    fn zero_idle_cap_errors() {
        let sim = lone_gift_sim(10);
        let result = EpisodeBuilder::new(&sim, FloatPolicy).max_idle_steps(0).build();
        assert!(matches!(result, Err(RunError::Config(_))));
    }
}

// ── Basic run ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn float_policy_runs_to_time_limit() {
        let sim = lone_gift_sim(7);
        let mut episode = EpisodeBuilder::new(&sim, FloatPolicy).build().unwrap();
        let summary = episode.run(&mut NoopObserver).unwrap();
        assert_eq!(summary.termination, Termination::TimeLimit);
        assert_eq!(summary.steps, 7);
        assert_eq!(summary.applied, 7);
        assert_eq!(summary.final_time, Tick(7));
        assert_eq!(summary.score, 0);
        assert!(episode.log().iter().all(|c| *c == Command::Float(1)));
    }

    #[test]
    fn observer_called_correct_number_of_times() {
        let sim = lone_gift_sim(5);
        let mut episode = EpisodeBuilder::new(&sim, FloatPolicy).build().unwrap();
        let mut obs = Counter::default();
        episode.run(&mut obs).unwrap();
        assert_eq!(obs.starts, 1);
        assert_eq!(obs.actions, 5);
        assert_eq!(obs.rejected, 0);
        assert_eq!(obs.ends, 1);
    }

    #[test]
    fn long_float_is_clamped_to_remaining_time() {
        let sim = lone_gift_sim(12);
        let mut episode = EpisodeBuilder::new(&sim, Stubborn(Action::Float(1_000))).build().unwrap();
        let summary = episode.run(&mut NoopObserver).unwrap();
        assert_eq!(summary.steps, 1);
        assert_eq!(summary.rejected, 0);
        assert_eq!(episode.log().as_slice(), &[Command::Float(12)]);
    }

    #[test]
    fn step_cap_stops_early() {
        let sim = lone_gift_sim(50);
        let mut episode = EpisodeBuilder::new(&sim, FloatPolicy).max_steps(3).build().unwrap();
        let summary = episode.run(&mut NoopObserver).unwrap();
        assert_eq!(summary.termination, Termination::StepLimit);
        assert_eq!(summary.final_time, Tick(3));
    }

    #[test]
    fn initial_fuel_is_logged_first() {
        let sim = lone_gift_sim(3);
        let mut episode = EpisodeBuilder::new(&sim, FloatPolicy).initial_fuel(30).build().unwrap();
        let summary = episode.run(&mut NoopObserver).unwrap();
        assert_eq!(episode.log()[0], Command::LoadCarrots(30));
        assert_eq!(summary.applied, 4);
        assert_eq!(summary.carrots_left, 30);
    }

    #[test]
    fn timeless_actions_end_as_idle() {
        let sim = lone_gift_sim(100);
        let mut episode = EpisodeBuilder::new(&sim, Stubborn(Action::LoadCarrots(1)))
            .max_idle_steps(5)
            .build()
            .unwrap();
        let summary = episode.run(&mut NoopObserver).unwrap();
        assert_eq!(summary.termination, Termination::Idle);
        assert_eq!(summary.steps, 5);
        assert_eq!(summary.final_time, Tick::ZERO);
        assert_eq!(episode.log().len(), 5);
        assert_eq!(summary.carrots_left, 5);
    }

    #[test]
    fn default_idle_cap_bounds_endless_refuelling() {
        let sim = lone_gift_sim(100);
        let mut episode = EpisodeBuilder::new(&sim, Stubborn(Action::LoadCarrots(1))).build().unwrap();
        let summary = episode.run(&mut NoopObserver).unwrap();
        assert_eq!(summary.termination, Termination::Idle);
        assert_eq!(summary.steps, DEFAULT_MAX_IDLE_STEPS);
    }

    #[test]
    fn floating_resets_the_idle_count() {
        let sim = lone_gift_sim(6);
        let policy = Stubborn(Action::accelerate(sleigh_physics::Direction::Up, 1));
        let mut episode = EpisodeBuilder::new(&sim, policy)
            .initial_fuel(10)
            .max_idle_steps(2)
            .build()
            .unwrap();
        let summary = episode.run(&mut NoopObserver).unwrap();
        // Accelerate (clock still), then rejected → Float(1) (clock moves).
        assert_eq!(summary.termination, Termination::TimeLimit);
        assert_eq!(summary.steps, 12);
    }

    #[test]
    fn greedy_delivers_everything() {
        let sim = lone_gift_sim(100);
        let mut episode = EpisodeBuilder::new(&sim, GreedyPolicy::new()).build().unwrap();
        let summary = episode.run(&mut NoopObserver).unwrap();
        assert_eq!(summary.termination, Termination::AllDelivered);
        assert_eq!(summary.score, 7);
        assert_eq!(summary.delivered, summary.total_gifts);
        assert_eq!(summary.rejected, 0);
    }
}

// ── Fallback ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod fallback_tests {
    use super::*;

    #[test]
    fn rejected_proposal_becomes_single_float() {
        let sim = lone_gift_sim(4);
        let mut episode = EpisodeBuilder::new(&sim, Stubborn(Action::LoadGift(99))).build().unwrap();
        let mut obs = Counter::default();
        let summary = episode.run(&mut obs).unwrap();

        assert_eq!(summary.termination, Termination::TimeLimit);
        assert_eq!(summary.rejected, 4);
        assert_eq!(obs.rejected, 4);
        assert_eq!(obs.actions, 4);
        assert!(episode.log().iter().all(|c| *c == Command::Float(1)));
    }

    #[test]
    fn double_acceleration_falls_back() {
        let sim = lone_gift_sim(6);
        let policy = Stubborn(Action::accelerate(sleigh_physics::Direction::Up, 1));
        let mut episode = EpisodeBuilder::new(&sim, policy).initial_fuel(10).build().unwrap();
        let summary = episode.run(&mut NoopObserver).unwrap();
        // Accelerate, rejected → Float, accelerate, … : every other step is a
        // fallback, and only fallbacks advance the clock.
        assert_eq!(summary.steps, 12);
        assert_eq!(summary.rejected, 6);
        assert_eq!(summary.carrots_left, 4);
    }
}

// ── Replay ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod replay_tests {
    use super::*;
    use crate::replay;

    #[test]
    fn replaying_a_produced_log_reaches_the_same_state() {
        let sim = lone_gift_sim(100);
        let mut episode = EpisodeBuilder::new(&sim, MissionPolicy::new()).initial_fuel(15).build().unwrap();
        let summary = episode.run(&mut NoopObserver).unwrap();
        let (state, log) = episode.into_parts();

        let outcome = replay(&sim, &log).unwrap();
        assert_eq!(outcome.state, state);
        assert_eq!(outcome.score, summary.score);
        assert_eq!(outcome.applied, log.len());
    }

    #[test]
    fn first_invalid_command_is_reported() {
        let sim = lone_gift_sim(10);
        let log = vec![
            Command::Float(1),
            Command::Accelerate { direction: sleigh_physics::Direction::Up, magnitude: 1 },
        ];
        match replay(&sim, &log) {
            Err(RunError::Replay { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected replay error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_gift_is_reported() {
        let sim = lone_gift_sim(10);
        let log = vec![Command::LoadGift("Nobody".into())];
        assert!(matches!(replay(&sim, &log), Err(RunError::Replay { index: 0, .. })));
    }

    #[test]
    fn empty_log_replays_to_initial_state() {
        let sim = lone_gift_sim(10);
        let outcome = replay(&sim, &Vec::<Command>::new()).unwrap();
        assert_eq!(outcome.state, sim.initial_state());
        assert_eq!(outcome.applied, 0);
    }
}

// ── Batch ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod batch_tests {
    use super::*;
    use crate::evaluate_batch;

    #[test]
    fn results_follow_input_order() {
        let sim = lone_gift_sim(100);
        let policies: Vec<Box<dyn Policy>> = vec![
            Box::new(FloatPolicy),
            Box::new(GreedyPolicy::new()),
            Box::new(MissionPolicy::new()),
        ];
        let results = evaluate_batch(&sim, policies);
        assert_eq!(results.len(), 3);
        let summaries: Vec<_> = results.into_iter().map(Result::unwrap).collect();
        assert_eq!(summaries[0].policy, "float");
        assert_eq!(summaries[0].score, 0);
        assert_eq!(summaries[1].policy, "greedy");
        assert_eq!(summaries[1].score, 7);
        assert_eq!(summaries[2].policy, "mission");
    }

    #[test]
    fn episodes_are_independent() {
        let sim = lone_gift_sim(100);
        let a = evaluate_batch(&sim, vec![GreedyPolicy::new(), GreedyPolicy::new()]);
        let a: Vec<_> = a.into_iter().map(Result::unwrap).collect();
        assert_eq!(a[0], a[1]);
    }
}
