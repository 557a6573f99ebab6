//! Episode observer trait for progress reporting and data collection.

use sleigh_physics::{Action, Command, SimError, SleighState};

use crate::EpisodeSummary;

/// Callbacks invoked by [`Episode::run`][crate::Episode::run] at key points
/// in the episode loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — delivery printer
///
/// ```rust,ignore
/// struct DeliveryPrinter;
///
/// impl EpisodeObserver for DeliveryPrinter {
///     fn on_action(&mut self, index: usize, command: &Command, state: &SleighState, score: u64) {
///         if matches!(command, Command::DeliverGift(_)) {
///             println!("#{index} at {}: {command} (score {score})", state.current_time);
///         }
///     }
/// }
/// ```
pub trait EpisodeObserver {
    /// Called once before the first decision.
    fn on_episode_start(&mut self, _state: &SleighState) {}

    /// Called after every applied action, fallbacks included.
    ///
    /// `index` is the command's position in the episode's command log;
    /// `state` is the state *after* the action and `score` its delivered
    /// score.
    fn on_action(&mut self, _index: usize, _command: &Command, _state: &SleighState, _score: u64) {}

    /// Called when the simulator refused a proposed action.
    ///
    /// `step` is the zero-based decision number.
    fn on_rejected(&mut self, _step: u64, _action: Action, _error: &SimError) {}

    /// Called once after the loop terminates.
    fn on_episode_end(&mut self, _summary: &EpisodeSummary, _state: &SleighState) {}
}

/// An [`EpisodeObserver`] that does nothing.  Use when you need to call `run`
/// but don't want callbacks.
pub struct NoopObserver;

impl EpisodeObserver for NoopObserver {}
