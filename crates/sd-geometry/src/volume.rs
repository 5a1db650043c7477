//! Detection volumes and their arena.

use slotmap::SlotMap;

use sd_core::{ComponentId, ParticleId, Vec3, VolumeId};

use crate::{GeometryError, GeometryResult, Shape, VolumeCollapse};

/// Who a volume belongs to: a sensing/emission component or a scent particle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VolumeOwner {
    Component(ComponentId),
    Particle(ParticleId),
}

impl VolumeOwner {
    pub fn component(self) -> Option<ComponentId> {
        match self {
            VolumeOwner::Component(c) => Some(c),
            VolumeOwner::Particle(_) => None,
        }
    }

    pub fn particle(self) -> Option<ParticleId> {
        match self {
            VolumeOwner::Particle(p) => Some(p),
            VolumeOwner::Component(_) => None,
        }
    }
}

/// One detection volume.
#[derive(Clone, Debug)]
pub struct Volume {
    pub owner: VolumeOwner,
    pub center: Vec3,
    pub shape: Shape,
    pub enabled: bool,
    collapse: VolumeCollapse,
}

impl Volume {
    pub fn new(owner: VolumeOwner, center: Vec3, shape: Shape) -> Self {
        Self {
            owner,
            center,
            shape,
            enabled: true,
            collapse: VolumeCollapse::default(),
        }
    }

    /// Shrink to zero extent.  See [`VolumeCollapse::collapse`].
    pub fn collapse(&mut self) -> bool {
        self.collapse.collapse(&mut self.shape)
    }

    /// Restore the authored extent.  See [`VolumeCollapse::restore`].
    pub fn restore(&mut self) -> bool {
        self.collapse.restore(&mut self.shape)
    }

    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.collapse.is_collapsed()
    }

    /// The authored shape regardless of collapse state.
    pub fn authored_shape(&self) -> Shape {
        self.collapse.saved().copied().unwrap_or(self.shape)
    }

    /// `true` if this volume takes part in detection this tick.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.enabled && !self.shape.is_degenerate()
    }

    /// Axis-aligned bounds as `(min, max)` corners.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let h = self.shape.bounding_half_extents();
        (self.center - h, self.center + h)
    }
}

// ── VolumeSet ─────────────────────────────────────────────────────────────────

/// Generational arena of volumes addressed by `VolumeId`.
///
/// Freed slots are reused; a removed volume's ID never resolves again.
#[derive(Default)]
pub struct VolumeSet {
    slots: SlotMap<VolumeId, Volume>,
}

impl VolumeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, volume: Volume) -> VolumeId {
        self.slots.insert(volume)
    }

    pub fn remove(&mut self, id: VolumeId) -> GeometryResult<Volume> {
        self.slots.remove(id).ok_or(GeometryError::VolumeNotFound(id))
    }

    #[inline]
    pub fn get(&self, id: VolumeId) -> Option<&Volume> {
        self.slots.get(id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: VolumeId) -> Option<&mut Volume> {
        self.slots.get_mut(id)
    }

    pub fn contains(&self, id: VolumeId) -> bool {
        self.slots.contains_key(id)
    }

    /// Set the enabled flag.  Returns `true` if it changed.
    pub fn set_enabled(&mut self, id: VolumeId, enabled: bool) -> bool {
        match self.get_mut(id) {
            Some(v) if v.enabled != enabled => {
                v.enabled = enabled;
                true
            }
            _ => false,
        }
    }

    pub fn set_center(&mut self, id: VolumeId, center: Vec3) {
        if let Some(v) = self.get_mut(id) {
            v.center = center;
        }
    }

    /// Volumes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (VolumeId, &Volume)> + '_ {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots allocated so far, occupied or free.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }
}
