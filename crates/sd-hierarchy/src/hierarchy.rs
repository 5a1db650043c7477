//! `Hierarchy` — the entity arena plus the root's global registries.
//!
//! The root keeps three indices over the arena:
//!
//! - `all_units`: every live Unit, in spawn order (attached or not);
//! - `all_systems`: every live System except Root, in registration order;
//! - the ID dictionary: system ID → entity, exactly mirroring `all_systems`.
//!
//! All three are updated only by `spawn_unit`, `add_system`, `remove` and the
//! explicit `register_*`/`unregister_*` calls.

use std::collections::HashMap;

use sd_core::{EntityId, Vec3};
use tracing::warn;

use crate::{Entity, EntityKind, HierarchyError, HierarchyResult};

/// System ID of the root.  Reserved.
pub const ROOT_SYSTEM_ID: &str = "Root";
/// System ID of the smell system.  Reserved.
pub const SMELL_SYSTEM_ID: &str = "Smell";

pub struct Hierarchy {
    slots: Vec<Option<Entity>>,
    root: EntityId,
    smell: EntityId,
    all_units: Vec<EntityId>,
    all_systems: Vec<EntityId>,
    ids: HashMap<String, EntityId>,
}

impl Default for Hierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl Hierarchy {
    /// A tree holding only Root and its Smell child.
    pub fn new() -> Self {
        let mut root = Entity::new(ROOT_SYSTEM_ID, EntityKind::Root, Some(ROOT_SYSTEM_ID.to_owned()));
        let mut smell =
            Entity::new(SMELL_SYSTEM_ID, EntityKind::Smell, Some(SMELL_SYSTEM_ID.to_owned()));
        let root_id = EntityId(0);
        let smell_id = EntityId(1);
        root.children.push(smell_id);
        smell.parent = Some(root_id);

        let mut ids = HashMap::new();
        ids.insert(SMELL_SYSTEM_ID.to_owned(), smell_id);

        Self {
            slots: vec![Some(root), Some(smell)],
            root: root_id,
            smell: smell_id,
            all_units: Vec::new(),
            all_systems: vec![smell_id],
            ids,
        }
    }

    #[inline]
    pub fn root(&self) -> EntityId {
        self.root
    }

    #[inline]
    pub fn smell(&self) -> EntityId {
        self.smell
    }

    // ── Arena access ──────────────────────────────────────────────────────

    #[inline]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn try_get(&self, id: EntityId) -> HierarchyResult<&Entity> {
        self.get(id).ok_or(HierarchyError::EntityNotFound(id))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn kind(&self, id: EntityId) -> Option<EntityKind> {
        self.get(id).map(Entity::kind)
    }

    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.get(id).and_then(Entity::parent)
    }

    /// Children of `id`; empty for unknown entities and units.
    pub fn children(&self, id: EntityId) -> &[EntityId] {
        self.get(id).map(Entity::children).unwrap_or(&[])
    }

    pub fn position(&self, id: EntityId) -> Option<Vec3> {
        self.get(id).map(|e| e.position)
    }

    pub fn set_position(&mut self, id: EntityId, position: Vec3) -> bool {
        match self.get_mut(id) {
            Some(e) => {
                e.position = position;
                true
            }
            None => false,
        }
    }

    /// Live entities in ascending ID order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| (EntityId(i as u32), e)))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Create a System under `parent` with a unique, non-reserved `system_id`.
    pub fn add_system(
        &mut self,
        parent: EntityId,
        name: &str,
        system_id: &str,
    ) -> HierarchyResult<EntityId> {
        if system_id.is_empty() {
            return Err(HierarchyError::EmptySystemId);
        }
        if system_id == ROOT_SYSTEM_ID || system_id == SMELL_SYSTEM_ID {
            return Err(HierarchyError::ReservedSystemId(system_id.to_owned()));
        }
        if self.ids.contains_key(system_id) {
            return Err(HierarchyError::DuplicateSystemId(system_id.to_owned()));
        }
        self.check_parent(parent)?;

        let id = self.push(Entity::new(name, EntityKind::System, Some(system_id.to_owned())));
        self.link(id, parent);
        self.all_systems.push(id);
        self.ids.insert(system_id.to_owned(), id);
        Ok(id)
    }

    /// Create a detached Unit.  It is registered in `all_units` immediately
    /// and joins the tree through [`init_entity`](Self::init_entity).
    pub fn spawn_unit(&mut self, name: &str) -> EntityId {
        let id = self.push(Entity::new(name, EntityKind::Unit, None));
        self.all_units.push(id);
        id
    }

    /// Create a Unit under `parent`.
    pub fn add_unit(&mut self, parent: EntityId, name: &str) -> HierarchyResult<EntityId> {
        self.check_parent(parent)?;
        let id = self.spawn_unit(name);
        self.link(id, parent);
        Ok(id)
    }

    /// Attach `entity` under the system registered as `system_id`.
    ///
    /// Logs a warning and returns `false` if no such system exists.
    pub fn init_entity(&mut self, entity: EntityId, system_id: &str) -> bool {
        let Some(parent) = self.lookup_system(system_id) else {
            warn!(%entity, system_id, "init_entity: system does not exist");
            return false;
        };
        match self.reparent(entity, parent) {
            Ok(()) => true,
            Err(e) => {
                warn!(%entity, system_id, error = %e, "init_entity rejected");
                false
            }
        }
    }

    /// Move `entity` (and its subtree) under `parent`.
    pub fn reparent(&mut self, entity: EntityId, parent: EntityId) -> HierarchyResult<()> {
        if entity == self.root || entity == self.smell {
            return Err(HierarchyError::Protected(entity));
        }
        self.try_get(entity)?;
        self.check_parent(parent)?;
        let mut cursor = Some(parent);
        while let Some(p) = cursor {
            if p == entity {
                return Err(HierarchyError::Cycle { child: entity, parent });
            }
            cursor = self.parent(p);
        }
        self.unlink(entity);
        self.link(entity, parent);
        Ok(())
    }

    /// Remove `entity` and its whole subtree, unregistering every system and
    /// unit in it.  Returns the removed IDs, parents before children.
    pub fn remove(&mut self, entity: EntityId) -> HierarchyResult<Vec<EntityId>> {
        if entity == self.root || entity == self.smell {
            return Err(HierarchyError::Protected(entity));
        }
        self.try_get(entity)?;
        self.unlink(entity);

        let mut removed = Vec::new();
        let mut stack = vec![entity];
        while let Some(id) = stack.pop() {
            let Some(e) = self.slots.get_mut(id.index()).and_then(Option::take) else {
                continue;
            };
            stack.extend(e.children.iter().rev().copied());
            match e.kind {
                EntityKind::Unit => self.all_units.retain(|&u| u != id),
                _ => {
                    self.all_systems.retain(|&s| s != id);
                    if let Some(sid) = &e.system_id {
                        self.ids.remove(sid);
                    }
                }
            }
            removed.push(id);
        }
        Ok(removed)
    }

    // ── Registries ────────────────────────────────────────────────────────

    /// Resolve a system ID.  `"Root"` resolves to the root.
    pub fn lookup_system(&self, system_id: &str) -> Option<EntityId> {
        if system_id == ROOT_SYSTEM_ID {
            return Some(self.root);
        }
        self.ids.get(system_id).copied()
    }

    /// `true` if `system_id` is reserved or held by a live system.
    pub fn is_id_in_use(&self, system_id: &str) -> bool {
        system_id == ROOT_SYSTEM_ID || self.ids.contains_key(system_id)
    }

    /// Add a live Unit to `all_units`.  Returns `false` if it was already
    /// there or is not a Unit.
    pub fn register_unit(&mut self, unit: EntityId) -> bool {
        if self.kind(unit) != Some(EntityKind::Unit) || self.all_units.contains(&unit) {
            return false;
        }
        self.all_units.push(unit);
        true
    }

    /// Drop a Unit from `all_units`.  Returns `false` if it was not listed.
    pub fn unregister_unit(&mut self, unit: EntityId) -> bool {
        let before = self.all_units.len();
        self.all_units.retain(|&u| u != unit);
        before != self.all_units.len()
    }

    /// Add a live System to `all_systems` and the ID dictionary.
    pub fn register_system(&mut self, system: EntityId) -> HierarchyResult<()> {
        let entity = self.try_get(system)?;
        if !matches!(entity.kind, EntityKind::System | EntityKind::Smell) {
            return Err(HierarchyError::NotASystem(system));
        }
        let sid = entity.system_id.clone().ok_or(HierarchyError::EmptySystemId)?;
        match self.ids.get(&sid) {
            Some(&existing) if existing == system => Ok(()),
            Some(_) => Err(HierarchyError::DuplicateSystemId(sid)),
            None => {
                self.ids.insert(sid, system);
                self.all_systems.push(system);
                Ok(())
            }
        }
    }

    /// Drop a System from `all_systems` and the ID dictionary.
    pub fn unregister_system(&mut self, system: EntityId) -> bool {
        let before = self.all_systems.len();
        self.all_systems.retain(|&s| s != system);
        self.ids.retain(|_, &mut s| s != system);
        before != self.all_systems.len()
    }

    pub fn all_units(&self) -> &[EntityId] {
        &self.all_units
    }

    pub fn all_systems(&self) -> &[EntityId] {
        &self.all_systems
    }

    /// Root's name followed by every registered system's name, in order.
    pub fn system_names(&self) -> Vec<String> {
        std::iter::once(self.root)
            .chain(self.all_systems.iter().copied())
            .filter_map(|id| self.get(id).map(|e| e.name.clone()))
            .collect()
    }

    /// Systems whose parent is Root, in child order.
    pub fn top_level_systems(&self) -> Vec<EntityId> {
        self.children(self.root)
            .iter()
            .copied()
            .filter(|&c| self.get(c).is_some_and(Entity::is_system))
            .collect()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn push(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.slots.len() as u32);
        self.slots.push(Some(entity));
        id
    }

    fn check_parent(&self, parent: EntityId) -> HierarchyResult<()> {
        if self.try_get(parent)?.is_system() {
            Ok(())
        } else {
            Err(HierarchyError::NotASystem(parent))
        }
    }

    fn link(&mut self, child: EntityId, parent: EntityId) {
        if let Some(p) = self.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    fn unlink(&mut self, child: EntityId) {
        let Some(parent) = self.get_mut(child).and_then(|c| c.parent.take()) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|&c| c != child);
        }
    }
}
