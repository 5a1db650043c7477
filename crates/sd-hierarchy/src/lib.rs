//! `sd-hierarchy` — the tree of Units and Systems.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`entity`]    | `Entity`, `EntityKind`, `Wiring`                           |
//! | [`hierarchy`] | `Hierarchy` — arena, parent/child links, root registries   |
//! | [`error`]     | `HierarchyError`, `HierarchyResult<T>`                     |
//!
//! # Ownership model
//!
//! Entities live in a slot arena addressed by `EntityId`.  Parent and child
//! links are stored as IDs in both directions and are only ever changed by
//! `Hierarchy`'s own insert/attach/remove paths, so the two directions cannot
//! drift apart.  Two entities exist from construction and cannot be removed:
//!
//! ```text
//! Root   ("Root",  EntityKind::Root)
//! └── Smell ("Smell", EntityKind::Smell)
//! ```

pub mod entity;
pub mod error;
pub mod hierarchy;

#[cfg(test)]
mod tests;

pub use entity::{Entity, EntityKind, Wiring};
pub use error::{HierarchyError, HierarchyResult};
pub use hierarchy::{Hierarchy, ROOT_SYSTEM_ID, SMELL_SYSTEM_ID};
