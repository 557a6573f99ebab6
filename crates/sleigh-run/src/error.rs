use sleigh_physics::{Command, SimError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("episode configuration error: {0}")]
    Config(String),

    #[error("command {index} ({command}) is invalid: {source}")]
    Replay {
        index:   usize,
        command: Command,
        #[source]
        source:  SimError,
    },

    #[error("state invariant violated: {0}")]
    Invariant(String),

    #[error("simulator error: {0}")]
    Sim(#[from] SimError),
}

pub type RunResult<T> = Result<T, RunError>;
