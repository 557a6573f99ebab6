//! The `TrajectoryWriter` trait implemented by backend writers.

use crate::{OutputResult, SummaryRow, TrajectoryRow};

/// Sink for per-step trajectory rows and per-episode summaries.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`TrajectoryObserver::take_error`][crate::TrajectoryObserver::take_error].
pub trait TrajectoryWriter {
    /// Write one applied command and the state it produced.
    fn write_step(&mut self, row: &TrajectoryRow) -> OutputResult<()>;

    /// Write the closing summary of one episode.
    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
