//! Geometry error type.

use thiserror::Error;

use sd_core::VolumeId;

/// Errors produced by `sd-geometry`.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("volume {0} not found")]
    VolumeNotFound(VolumeId),

    #[error("invalid shape: {0}")]
    InvalidShape(String),
}

pub type GeometryResult<T> = Result<T, GeometryError>;
