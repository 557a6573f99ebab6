//! `sleigh-output` — episode output for the sleigh simulator.
//!
//! | Module          | Files / format                                          |
//! |-----------------|---------------------------------------------------------|
//! | [`command_log`] | action log: count line + `<Action> <param>` lines       |
//! | [`csv`]         | `trajectory.csv`, `episode_summary.csv`                 |
//!
//! The CSV backend implements [`TrajectoryWriter`] and is driven by
//! [`TrajectoryObserver`], which implements `sleigh_run::EpisodeObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sleigh_output::{CsvTrajectoryWriter, TrajectoryObserver, write_command_log_file};
//!
//! let writer = CsvTrajectoryWriter::new(Path::new("./output")).unwrap();
//! let mut obs = TrajectoryObserver::new(writer);
//! episode.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! write_command_log_file(Path::new("out.txt"), episode.log())?;
//! ```

pub mod command_log;
pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use self::csv::CsvTrajectoryWriter;
pub use command_log::{read_command_log, read_command_log_file, write_command_log, write_command_log_file};
pub use error::{OutputError, OutputResult};
pub use observer::TrajectoryObserver;
pub use row::{SummaryRow, TrajectoryRow};
pub use writer::TrajectoryWriter;
