//! Base error type.
//!
//! Sub-crates define their own error enums and convert `CoreError` into them
//! via `From` impls where a core parse can fail inside their own parsing.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `sleigh-core`.
pub type CoreResult<T> = Result<T, CoreError>;
