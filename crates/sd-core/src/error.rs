//! Framework error type.
//!
//! Sub-crates define their own error enums and convert them into their own
//! top-level error via `From` impls; `SdError` covers the failures that can
//! happen against the core types themselves.

use thiserror::Error;

use crate::{ComponentId, EntityId};

/// The top-level error type for `sd-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum SdError {
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("component {0} not found")]
    ComponentNotFound(ComponentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `sd-*` crates.
pub type SdResult<T> = Result<T, SdError>;
