//! One node of the sensing hierarchy.

use sd_core::{ComponentId, EntityId, Vec3};

/// What role an entity plays in the tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    /// A leaf agent.
    Unit,
    /// A composite owning child entities and a unique system ID.
    System,
    /// The singleton root of the tree.
    Root,
    /// The singleton system owning live scent particles.
    Smell,
}

impl EntityKind {
    /// `true` for every kind that may own children.
    #[inline]
    pub fn is_system(self) -> bool {
        !matches!(self, EntityKind::Unit)
    }
}

/// The singleton components an entity routes through.
///
/// `direct_input` receives `send_direct`; `direct_output` is the wired
/// point-to-point sender; `broadcast` is used for re-broadcast.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Wiring {
    pub direct_input: Option<ComponentId>,
    pub direct_output: Option<ComponentId>,
    pub broadcast: Option<ComponentId>,
}

/// A Unit or System.
///
/// Tree links (`parent`, `children`) and identity (`kind`, `system_id`) are
/// read-only here and maintained by [`Hierarchy`](crate::Hierarchy).
#[derive(Clone, Debug)]
pub struct Entity {
    pub name: String,
    /// World position, owned by the positional collaborator.
    pub position: Vec3,
    pub wiring: Wiring,
    /// Every component attached to this entity, in attach order.
    pub components: Vec<ComponentId>,
    pub(crate) kind: EntityKind,
    pub(crate) parent: Option<EntityId>,
    pub(crate) children: Vec<EntityId>,
    pub(crate) system_id: Option<String>,
}

impl Entity {
    pub(crate) fn new(name: &str, kind: EntityKind, system_id: Option<String>) -> Self {
        Self {
            name: name.to_owned(),
            position: Vec3::ZERO,
            wiring: Wiring::default(),
            components: Vec::new(),
            kind,
            parent: None,
            children: Vec::new(),
            system_id,
        }
    }

    #[inline]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    #[inline]
    pub fn is_system(&self) -> bool {
        self.kind.is_system()
    }

    #[inline]
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Children in insertion order.
    #[inline]
    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    /// The system ID, for system kinds.
    pub fn system_id(&self) -> Option<&str> {
        self.system_id.as_deref()
    }
}
