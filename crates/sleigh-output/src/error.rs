//! Error types for sleigh-output.

use sleigh_physics::ParseCommandError;
use thiserror::Error;

/// Errors that can occur when reading or writing episode output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: {source}")]
    Parse {
        line:   usize,
        #[source]
        source: ParseCommandError,
    },

    #[error("malformed command log: {0}")]
    Format(String),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
