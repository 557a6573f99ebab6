use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("problem file is empty")]
    Empty,

    #[error("line {line}: {msg}")]
    Parse { line: u64, msg: String },

    #[error("header declares {expected} {what} but {got} were supplied")]
    CountMismatch {
        what:     &'static str,
        expected: usize,
        got:      usize,
    },

    #[error("duplicate gift name {0:?}")]
    DuplicateGift(String),

    #[error("invalid acceleration bands: {0}")]
    Bands(String),

    #[error("generator configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ProblemResult<T> = Result<T, ProblemError>;
