//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `trajectory.csv`
//! - `episode_summary.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TrajectoryWriter;
use crate::{OutputResult, SummaryRow, TrajectoryRow};

pub const TRAJECTORY_FILE: &str = "trajectory.csv";
pub const SUMMARY_FILE: &str = "episode_summary.csv";

const TRAJECTORY_HEADER: [&str; 12] = [
    "step", "time", "command", "c", "r", "vc", "vr", "weight", "carrots", "loaded", "delivered", "score",
];

const SUMMARY_HEADER: [&str; 10] = [
    "policy", "termination", "steps", "applied", "rejected", "final_time", "score", "delivered",
    "total_gifts", "carrots_left",
];

/// Writes episode output to two CSV files.
pub struct CsvTrajectoryWriter {
    steps:     Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvTrajectoryWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut steps = Writer::from_path(dir.join(TRAJECTORY_FILE))?;
        steps.write_record(TRAJECTORY_HEADER)?;

        let mut summaries = Writer::from_path(dir.join(SUMMARY_FILE))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self {
            steps,
            summaries,
            finished: false,
        })
    }
}

impl TrajectoryWriter for CsvTrajectoryWriter {
    fn write_step(&mut self, row: &TrajectoryRow) -> OutputResult<()> {
        self.steps.write_record(&[
            row.step.to_string(),
            row.time.to_string(),
            row.command.clone(),
            row.c.to_string(),
            row.r.to_string(),
            row.vc.to_string(),
            row.vr.to_string(),
            row.weight.to_string(),
            row.carrots.to_string(),
            row.loaded.to_string(),
            row.delivered.to_string(),
            row.score.to_string(),
        ])?;
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.policy.clone(),
            row.termination.clone(),
            row.steps.to_string(),
            row.applied.to_string(),
            row.rejected.to_string(),
            row.final_time.to_string(),
            row.score.to_string(),
            row.delivered.to_string(),
            row.total_gifts.to_string(),
            row.carrots_left.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.steps.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
