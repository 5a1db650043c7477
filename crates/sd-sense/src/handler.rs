//! Handler sets and the deferred commands they produce.

use std::fmt;

use sd_core::{ComponentId, EntityId, ParticleId, Tick, Vec3};

/// A world mutation requested by a handler, applied after the firing
/// operation completes.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetActivated { component: ComponentId, activated: bool },
    ResetActivations { component: ComponentId },
    /// Deliver `stimulus` to `target`'s direct-connection input.
    SendDirect { target: EntityId, stimulus: String },
    /// Fan `stimulus` out through `entity`'s broadcast output.
    Broadcast { entity: EntityId, stimulus: String },
    /// Fire entry `index` of a direct-connection output.
    SendOutput { component: ComponentId, index: usize },
    SetProbability { component: ComponentId, probability: f32 },
    SetPosition { entity: EntityId, position: Vec3 },
    SetParticleDirection { particle: ParticleId, direction: Vec3 },
    /// Remove `entity` and its subtree.
    Despawn { entity: EntityId },
}

/// Context handed to every handler invocation.
pub struct Firing<'a> {
    pub entity: EntityId,
    pub component: ComponentId,
    pub tick: Tick,
    /// The token that triggered this firing; `None` for timer-driven inputs.
    pub stimulus: Option<&'a str>,
    probability: Option<&'a mut f32>,
    commands: &'a mut Vec<Command>,
}

impl<'a> Firing<'a> {
    pub fn new(
        entity: EntityId,
        component: ComponentId,
        tick: Tick,
        stimulus: Option<&'a str>,
        commands: &'a mut Vec<Command>,
    ) -> Self {
        Self { entity, component, tick, stimulus, probability: None, commands }
    }

    /// Give the handler live access to a random-activation probability.
    pub fn with_probability(mut self, probability: &'a mut f32) -> Self {
        self.probability = Some(probability);
        self
    }

    /// Current activation probability, when invoked as a probability adjuster.
    pub fn probability(&self) -> Option<f32> {
        self.probability.as_deref().copied()
    }

    /// Overwrite the live probability (clamped to `[0, 1]`).  Returns `false`
    /// outside a probability adjuster.
    pub fn set_probability(&mut self, value: f32) -> bool {
        match self.probability.as_deref_mut() {
            Some(p) => {
                *p = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
                true
            }
            None => false,
        }
    }

    /// Queue an arbitrary command.
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn send_direct(&mut self, target: EntityId, stimulus: &str) {
        self.push(Command::SendDirect { target, stimulus: stimulus.to_owned() });
    }

    pub fn broadcast(&mut self, entity: EntityId, stimulus: &str) {
        self.push(Command::Broadcast { entity, stimulus: stimulus.to_owned() });
    }

    pub fn send_output(&mut self, component: ComponentId, index: usize) {
        self.push(Command::SendOutput { component, index });
    }

    pub fn set_activated(&mut self, component: ComponentId, activated: bool) {
        self.push(Command::SetActivated { component, activated });
    }

    pub fn reset_activations(&mut self, component: ComponentId) {
        self.push(Command::ResetActivations { component });
    }

    pub fn set_position(&mut self, entity: EntityId, position: Vec3) {
        self.push(Command::SetPosition { entity, position });
    }

    pub fn set_particle_direction(&mut self, particle: ParticleId, direction: Vec3) {
        self.push(Command::SetParticleDirection { particle, direction });
    }

    pub fn despawn(&mut self, entity: EntityId) {
        self.push(Command::Despawn { entity });
    }
}

/// One handler callback.
pub type Handler = Box<dyn FnMut(&mut Firing<'_>) + Send>;

/// An ordered list of handlers invoked together.
#[derive(Default)]
pub struct HandlerSet {
    handlers: Vec<Handler>,
}

impl HandlerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding a single handler.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(&mut Firing<'_>) + Send + 'static,
    {
        Self::new().with(f)
    }

    /// Builder-style [`push`](Self::push).
    pub fn with<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut Firing<'_>) + Send + 'static,
    {
        self.push(f);
        self
    }

    pub fn push<F>(&mut self, f: F)
    where
        F: FnMut(&mut Firing<'_>) + Send + 'static,
    {
        self.handlers.push(Box::new(f));
    }

    /// Call every handler in order.
    pub fn invoke(&mut self, firing: &mut Firing<'_>) {
        for handler in &mut self.handlers {
            handler(firing);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HandlerSet({} handlers)", self.handlers.len())
    }
}
