//! Output strategies: how an entity emits stimuli.

use sd_core::EntityId;
use sd_geometry::Shape;

use crate::{ParticleTemplate, TriggerMode};

/// Fans a token out to every child of a System (or every top-level System
/// when owned by Root).  Inert on a Unit.  At most one per entity.
#[derive(Copy, Clone, Debug, Default)]
pub struct BroadcastOutput;

// ── DirectOutput ──────────────────────────────────────────────────────────────

/// Wired point-to-point sender: entry `i` sends `stimuli[i]` to `targets[i]`.
/// At most one per entity.
#[derive(Clone, Debug, Default)]
pub struct DirectOutput {
    pub targets: Vec<Option<EntityId>>,
    pub stimuli: Vec<String>,
}

impl DirectOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append a `(target, token)` entry.
    pub fn connect(mut self, target: EntityId, token: &str) -> Self {
        self.targets.push(Some(target));
        self.stimuli.push(token.to_owned());
        self
    }

    /// Resolve entry `index`; `None` if out of range in either list or the
    /// target slot is empty.
    pub fn entry(&self, index: usize) -> Option<(EntityId, &str)> {
        let target = (*self.targets.get(index)?)?;
        let token = self.stimuli.get(index)?;
        Some((target, token.as_str()))
    }
}

// ── EmitParticleOutput ────────────────────────────────────────────────────────

/// Emits one scent particle per token every `periods_secs[i]` while
/// activated.  `stimuli` and `periods_secs` must have the same length.
#[derive(Clone, Debug)]
pub struct EmitParticleOutput {
    pub stimuli: Vec<String>,
    pub periods_secs: Vec<f32>,
    /// Particles spawn uniformly inside this sphere around the owner.
    pub emission_radius: f32,
    pub template: ParticleTemplate,
}

impl Default for EmitParticleOutput {
    fn default() -> Self {
        Self {
            stimuli: Vec::new(),
            periods_secs: Vec::new(),
            emission_radius: 1.0,
            template: ParticleTemplate::default(),
        }
    }
}

impl EmitParticleOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: emit `token` every `period_secs`.
    pub fn emit(mut self, token: &str, period_secs: f32) -> Self {
        self.stimuli.push(token.to_owned());
        self.periods_secs.push(period_secs);
        self
    }

    pub fn with_radius(mut self, emission_radius: f32) -> Self {
        self.emission_radius = emission_radius;
        self
    }

    pub fn with_template(mut self, template: ParticleTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn is_consistent(&self) -> bool {
        self.stimuli.len() == self.periods_secs.len()
    }
}

// ── PresenceOutput ────────────────────────────────────────────────────────────

/// A persistent volume tagged with one token: the owner's footprint.
#[derive(Clone, Debug)]
pub struct PresenceOutput {
    pub stimulus: String,
    pub shape: Shape,
}

impl Default for PresenceOutput {
    fn default() -> Self {
        Self { stimulus: String::new(), shape: Shape::default() }
    }
}

impl PresenceOutput {
    pub fn new(stimulus: &str, shape: Shape) -> Self {
        Self { stimulus: stimulus.to_owned(), shape }
    }
}

// ── PresenceActivationOutput ──────────────────────────────────────────────────

/// A volume that, on touching another entity's presence whose token is in
/// `stimulable`, sends its own token to that entity's direct input.
#[derive(Clone, Debug)]
pub struct PresenceActivationOutput {
    pub mode: TriggerMode,
    pub stimulus: String,
    pub shape: Shape,
    pub stimulable: Vec<String>,
}

impl PresenceActivationOutput {
    pub fn new(mode: TriggerMode, stimulus: &str, shape: Shape) -> Self {
        Self {
            mode,
            stimulus: stimulus.to_owned(),
            shape,
            stimulable: Vec::new(),
        }
    }

    /// Builder: react to presences tagged `token`.
    pub fn stimulates(mut self, token: &str) -> Self {
        self.stimulable.push(token.to_owned());
        self
    }

    pub fn allows(&self, token: &str) -> bool {
        self.stimulable.iter().any(|s| s == token)
    }
}
