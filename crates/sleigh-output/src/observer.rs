//! `TrajectoryObserver<W>` — bridges `EpisodeObserver` to a `TrajectoryWriter`.

use sleigh_physics::{Command, SleighState};
use sleigh_run::{EpisodeObserver, EpisodeSummary};

use crate::row::{SummaryRow, TrajectoryRow};
use crate::writer::TrajectoryWriter;
use crate::{OutputError, OutputResult};

/// An [`EpisodeObserver`] that records every applied command and the episode
/// summary to any [`TrajectoryWriter`] backend.
///
/// Errors from the writer are stored internally because `EpisodeObserver`
/// methods have no return value.  After `episode.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct TrajectoryObserver<W: TrajectoryWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: TrajectoryWriter> TrajectoryObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `episode.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the episode).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TrajectoryWriter> EpisodeObserver for TrajectoryObserver<W> {
    fn on_action(&mut self, index: usize, command: &Command, state: &SleighState, score: u64) {
        let row = TrajectoryRow {
            step:      index as u64,
            time:      state.current_time.0,
            command:   command.to_string(),
            c:         state.position.c,
            r:         state.position.r,
            vc:        state.velocity.vc,
            vr:        state.velocity.vr,
            weight:    state.sleigh_weight,
            carrots:   state.carrot_count,
            loaded:    state.loaded_gifts.len() as u64,
            delivered: state.delivered_gifts.len() as u64,
            score,
        };
        let result = self.writer.write_step(&row);
        self.store_err(result);
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary, _state: &SleighState) {
        let row = SummaryRow {
            policy:       summary.policy.clone(),
            termination:  format!("{:?}", summary.termination),
            steps:        summary.steps,
            applied:      summary.applied,
            rejected:     summary.rejected,
            final_time:   summary.final_time.0,
            score:        summary.score,
            delivered:    summary.delivered as u64,
            total_gifts:  summary.total_gifts as u64,
            carrots_left: summary.carrots_left,
        };
        let result = self.writer.write_summary(&row);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
