//! Sense error type.

use thiserror::Error;

/// Errors produced by `sd-sense`.
#[derive(Debug, Error)]
pub enum SenseError {
    #[error("unknown sense kind {0:?}")]
    UnknownKind(String),
}

pub type SenseResult<T> = Result<T, SenseError>;
