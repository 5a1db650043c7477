//! Scent particles and the field that owns them.
//!
//! A particle carries exactly one token from its author.  Author and token
//! are write-once: [`Particle::init`] only succeeds on a fresh particle, so a
//! payload cannot be forged after emission.  Direction stays mutable (wind).

use slotmap::SlotMap;

use sd_core::{EntityId, ParticleId, Tick, Vec3, VolumeId};

/// Motion and size parameters copied into every emitted particle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParticleTemplate {
    /// Velocity in world units per second.
    pub direction: Vec3,
    pub time_alive_secs: f32,
    pub collider_radius: f32,
}

impl Default for ParticleTemplate {
    fn default() -> Self {
        Self {
            direction: Vec3::ZERO,
            time_alive_secs: 5.0,
            collider_radius: 0.5,
        }
    }
}

/// A free-floating, single-use stimulus carrier.
#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec3,
    pub direction: Vec3,
    pub collider_radius: f32,
    /// The particle expires at the start of this tick.
    pub expires_at: Tick,
    /// Detection volume registered for this particle, if any.
    pub volume: Option<VolumeId>,
    author: Option<EntityId>,
    stimulus: String,
}

impl Particle {
    /// An uninitialized particle at `position`.
    pub fn new(template: &ParticleTemplate, position: Vec3, expires_at: Tick) -> Self {
        Self {
            position,
            direction: template.direction,
            collider_radius: template.collider_radius,
            expires_at,
            volume: None,
            author: None,
            stimulus: String::new(),
        }
    }

    /// Stamp author and token.  No-op returning `false` if already stamped.
    pub fn init(&mut self, author: EntityId, stimulus: &str) -> bool {
        if self.author.is_some() {
            return false;
        }
        self.author = Some(author);
        self.stimulus = stimulus.to_owned();
        true
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.author.is_some()
    }

    pub fn author(&self) -> Option<EntityId> {
        self.author
    }

    pub fn stimulus(&self) -> &str {
        &self.stimulus
    }

    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction;
    }

    /// Move by `direction * dt`.
    pub fn step(&mut self, dt: f32) {
        self.position += self.direction * dt;
    }

    /// Take the token out of a consumed particle.
    pub fn into_stimulus(self) -> String {
        self.stimulus
    }
}

// ── SmellField ────────────────────────────────────────────────────────────────

/// Every live particle in the world.  Consumed and expired slots are reused
/// under a new generation, so a stale ID can never resolve again.
#[derive(Default)]
pub struct SmellField {
    slots: SlotMap<ParticleId, Particle>,
}

impl SmellField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, particle: Particle) -> ParticleId {
        self.slots.insert(particle)
    }

    /// Remove and return a particle.  Succeeds at most once per ID.
    pub fn consume(&mut self, id: ParticleId) -> Option<Particle> {
        self.slots.remove(id)
    }

    #[inline]
    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.slots.get(id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.slots.get_mut(id)
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.slots.contains_key(id)
    }

    /// Move every particle by `dt` seconds and remove those expiring at or
    /// before `now`.  Returns the expired particles in slot order.
    pub fn advance(&mut self, dt: f32, now: Tick) -> Vec<(ParticleId, Particle)> {
        let mut expiring = Vec::new();
        for (id, p) in self.slots.iter_mut() {
            if p.expires_at <= now {
                expiring.push(id);
            } else {
                p.step(dt);
            }
        }
        expiring
            .into_iter()
            .filter_map(|id| self.slots.remove(id).map(|p| (id, p)))
            .collect()
    }

    /// Live particles in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ParticleId, &Particle)> + '_ {
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
