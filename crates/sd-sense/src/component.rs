//! An attached sense together with the runtime state every kind shares.

use sd_core::{ComponentId, ComponentRng, EntityId, VolumeId};
use sd_schedule::TimerSlot;

use crate::{Activable, Sense, SenseKind};

/// One sensing/emission component, owned by the world's component arena.
pub struct Component {
    /// Owning entity (back-reference).
    pub entity: EntityId,
    pub activable: Activable,
    pub sense: Sense,
    /// Detection volume, for overlap-driven kinds.
    pub volume: Option<VolumeId>,
    /// Cancellation state for timer-driven kinds.
    pub timer: TimerSlot,
    pub rng: ComponentRng,
}

impl Component {
    pub fn new(
        id: ComponentId,
        entity: EntityId,
        sense: Sense,
        activable: Activable,
        global_seed: u64,
    ) -> Self {
        Self {
            entity,
            activable,
            sense,
            volume: None,
            timer: TimerSlot::default(),
            rng: ComponentRng::new(global_seed, id),
        }
    }

    #[inline]
    pub fn kind(&self) -> SenseKind {
        self.sense.kind()
    }
}
