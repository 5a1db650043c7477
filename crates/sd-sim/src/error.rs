use sd_core::{ComponentId, EntityId, SdError};
use sd_geometry::GeometryError;
use sd_hierarchy::HierarchyError;
use sd_sense::SenseKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("entity {entity} already has a {kind} component")]
    DuplicateComponent { entity: EntityId, kind: SenseKind },

    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("component {0} not found")]
    ComponentNotFound(ComponentId),

    #[error(transparent)]
    Core(#[from] SdError),

    #[error("hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),

    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type SimResult<T> = Result<T, SimError>;
