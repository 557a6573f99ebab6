//! Simulator error types.
//!
//! The public contract has a single failure kind, [`SimError::InvalidAction`].
//! The attached [`Rejection`] says which precondition failed; callers may log
//! it but should not need to branch on it.

use thiserror::Error;

use sleigh_core::Tick;

use crate::{Action, Command};

/// Why an action was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("the previous action was an acceleration; the sleigh must float first")]
    MustFloat,

    #[error("no carrots left")]
    OutOfCarrots,

    #[error("{0} must be at least 1")]
    NonPositive(&'static str),

    #[error("acceleration {requested} exceeds the maximum {max} for weight {weight}")]
    OverCap { requested: u64, max: u64, weight: u64 },

    #[error("floating {ticks} ticks from {now} passes the time limit {limit}")]
    TimeBudget { now: Tick, ticks: u64, limit: Tick },

    #[error("index {index} out of range for {len} gifts")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("target is {distance:.2} away, interaction range is {range}")]
    OutOfRange { distance: f64, range: u64 },

    #[error("gift {0:?} is not in the catalog")]
    UnknownGift(String),

    #[error("gift {0:?} is not available for loading")]
    NotAvailable(String),

    #[error("gift {0:?} is not on the sleigh")]
    NotLoaded(String),

    #[error("{0} would overflow")]
    Overflow(&'static str),
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid action {action}: {reason}")]
    InvalidAction { action: Action, reason: Rejection },

    #[error("command {command} cannot be resolved: {reason}")]
    InvalidCommand { command: Command, reason: Rejection },

    #[error("simulator configuration error: {0}")]
    Config(String),
}

impl SimError {
    /// The rejection reason for action and command failures.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            SimError::InvalidAction { reason, .. } | SimError::InvalidCommand { reason, .. } => {
                Some(reason)
            }
            SimError::Config(_) => None,
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;

/// A line of an action log that is not a valid command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid command {line:?}: {reason}")]
pub struct ParseCommandError {
    pub line:   String,
    pub reason: String,
}
