//! Hierarchy error type.

use thiserror::Error;

use sd_core::EntityId;

/// Errors produced by structural hierarchy operations.
#[derive(Debug, Error)]
pub enum HierarchyError {
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("system ID must not be empty")]
    EmptySystemId,

    #[error("system ID {0:?} is reserved")]
    ReservedSystemId(String),

    #[error("system ID {0:?} is already in use")]
    DuplicateSystemId(String),

    #[error("entity {0} is not a system and cannot own children")]
    NotASystem(EntityId),

    #[error("entity {0} cannot be moved or removed")]
    Protected(EntityId),

    #[error("attaching {child} under {parent} would create a cycle")]
    Cycle { child: EntityId, parent: EntityId },
}

pub type HierarchyResult<T> = Result<T, HierarchyError>;
