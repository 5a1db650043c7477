//! The world context: entity and component arenas, the stimulus routing
//! protocol, and component lifecycle.
//!
//! Every runtime stimulus operation returns `bool` (accepted / rejected) and
//! never fails the simulation.  Handler commands queued during an operation
//! are applied FIFO once it returns, so the public entry points here are the
//! only places that flush.

use std::collections::VecDeque;

use tracing::{debug, trace, warn};

use sd_core::{ComponentId, EntityId, ParticleId, SimClock, StimulusRegistry, Vec3, VolumeId};
use sd_geometry::{OverlapDetector, Shape, SweepDetector, Volume, VolumeOwner, VolumeSet};
use sd_hierarchy::{EntityKind, Hierarchy};
use sd_schedule::{TimerEntry, TimerWheel};
use sd_sense::{
    Activable, Command, Component, Firing, Particle, ParticleTemplate, PresenceToggle, Sense,
    SenseKind, SmellField, ToggleStep,
};

use crate::kinds;
use crate::{Channel, Delivery, SimError, SimResult, WorldConfig};

/// Everything one simulation instance owns.  Constructed once per run.
pub struct World {
    pub config: WorldConfig,
    pub clock: SimClock,
    pub(crate) hierarchy: Hierarchy,
    pub(crate) components: Vec<Option<Component>>,
    pub(crate) stimuli: StimulusRegistry,
    pub(crate) smell: SmellField,
    pub(crate) volumes: VolumeSet,
    pub(crate) detector: Box<dyn OverlapDetector>,
    pub(crate) timers: TimerWheel,
    toggle: PresenceToggle,
    pending: VecDeque<Command>,
    deliveries: Vec<Delivery>,
    started: bool,
}

impl World {
    /// A world using the reference [`SweepDetector`].
    pub fn new(config: WorldConfig) -> Self {
        Self::with_detector(config, Box::new(SweepDetector::new()))
    }

    pub fn with_detector(config: WorldConfig, detector: Box<dyn OverlapDetector>) -> Self {
        Self {
            clock: config.sim.make_clock(),
            stimuli: StimulusRegistry::from_tokens(&config.stimuli),
            toggle: PresenceToggle::new(config.presence_toggle),
            hierarchy: Hierarchy::new(),
            components: Vec::new(),
            smell: SmellField::new(),
            volumes: VolumeSet::new(),
            detector,
            timers: TimerWheel::new(),
            pending: VecDeque::new(),
            deliveries: Vec::new(),
            started: false,
            config,
        }
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn stimuli(&self) -> &StimulusRegistry {
        &self.stimuli
    }

    /// The vocabulary is writable at authoring time only; the runtime reads it.
    pub fn stimuli_mut(&mut self) -> &mut StimulusRegistry {
        &mut self.stimuli
    }

    pub fn smell_field(&self) -> &SmellField {
        &self.smell
    }

    pub fn volumes(&self) -> &VolumeSet {
        &self.volumes
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.index()).and_then(Option::as_ref)
    }

    fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Live components in ID order.
    pub fn components(&self) -> impl Iterator<Item = (ComponentId, &Component)> + '_ {
        self.components
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|c| (ComponentId(i as u32), c)))
    }

    pub fn activable(&self, id: ComponentId) -> Option<&Activable> {
        self.component(id).map(|c| &c.activable)
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.smell.get(id)
    }

    /// `true` once timers have been started by the first step.
    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn pending_commands(&self) -> usize {
        self.pending.len()
    }

    // ── Hierarchy ─────────────────────────────────────────────────────────

    pub fn root(&self) -> EntityId {
        self.hierarchy.root()
    }

    pub fn add_system(
        &mut self,
        parent: EntityId,
        name: &str,
        system_id: &str,
    ) -> SimResult<EntityId> {
        Ok(self.hierarchy.add_system(parent, name, system_id)?)
    }

    pub fn add_unit(&mut self, parent: EntityId, name: &str) -> SimResult<EntityId> {
        Ok(self.hierarchy.add_unit(parent, name)?)
    }

    /// A detached unit, to be placed with [`init_entity`](Self::init_entity).
    pub fn spawn_unit(&mut self, name: &str) -> EntityId {
        self.hierarchy.spawn_unit(name)
    }

    pub fn init_entity(&mut self, entity: EntityId, system_id: &str) -> bool {
        self.hierarchy.init_entity(entity, system_id)
    }

    pub fn set_position(&mut self, entity: EntityId, position: Vec3) -> bool {
        self.hierarchy.set_position(entity, position)
    }

    /// Remove `entity` and its subtree, detaching every component they own.
    /// Particles they authored live on until expiry.
    pub fn remove_entity(&mut self, entity: EntityId) -> SimResult<Vec<EntityId>> {
        let removed = self.hierarchy.remove(entity)?;
        let doomed: Vec<ComponentId> = self
            .components()
            .filter(|(_, c)| removed.contains(&c.entity))
            .map(|(id, _)| id)
            .collect();
        for id in doomed {
            self.drop_component(id);
        }
        Ok(removed)
    }

    // ── Attach / detach ───────────────────────────────────────────────────

    /// Attach `kind` with its authoring defaults.
    pub fn attach_default(&mut self, entity: EntityId, kind: SenseKind) -> SimResult<ComponentId> {
        self.attach(entity, kinds::entry(kind).default_config())
    }

    pub fn attach(&mut self, entity: EntityId, sense: Sense) -> SimResult<ComponentId> {
        self.attach_with(entity, sense, Activable::default())
    }

    /// Attach `sense` with an explicit activation state.
    ///
    /// Configuration problems are logged and leave the affected feature
    /// inert; only a missing entity or a second singleton is an error.
    pub fn attach_with(
        &mut self,
        entity: EntityId,
        mut sense: Sense,
        activable: Activable,
    ) -> SimResult<ComponentId> {
        let kind = sense.kind();
        let entry = kinds::entry(kind);
        let owner = self.hierarchy.get(entity).ok_or(SimError::EntityNotFound(entity))?;
        if entry.singleton.is_some_and(|slot| slot.get(&owner.wiring).is_some()) {
            return Err(SimError::DuplicateComponent { entity, kind });
        }

        for issue in sense.config_issues() {
            warn!(%entity, %kind, %issue, "component configuration error");
        }
        if kind == SenseKind::OutputBroadcast && owner.kind() == EntityKind::Unit {
            warn!(%entity, "broadcast output attached to a unit is inert");
        }
        if self.config.strict_vocabulary {
            for token in sense.tokens() {
                if !self.stimuli.is_valid(token) {
                    warn!(%entity, %kind, token, "token missing from the stimulus registry");
                }
            }
        }
        let position = owner.position;

        if let Sense::Random(random) = &mut sense {
            random.snapshot_initial();
        }
        let id = ComponentId(self.components.len() as u32);
        let shape = sense.detection_shape();
        let mut component = Component::new(id, entity, sense, activable, self.config.sim.seed);
        if let Some(shape) = shape {
            let mut volume = Volume::new(VolumeOwner::Component(id), position, shape);
            volume.enabled = kind == SenseKind::InputSmell || component.activable.activated;
            component.volume = Some(self.volumes.insert(volume));
        }
        let arm_now = self.started && kind.is_timed() && component.activable.activated;
        self.components.push(Some(component));

        if let Some(owner) = self.hierarchy.get_mut(entity) {
            owner.components.push(id);
            if let Some(slot) = entry.singleton {
                slot.set(&mut owner.wiring, Some(id));
            }
        }
        if arm_now {
            self.arm_timer(id);
        }
        Ok(id)
    }

    pub fn detach(&mut self, id: ComponentId) -> SimResult<()> {
        self.drop_component(id).map(|_| ()).ok_or(SimError::ComponentNotFound(id))
    }

    fn drop_component(&mut self, id: ComponentId) -> Option<Component> {
        let component = self.components.get_mut(id.index()).and_then(Option::take)?;
        self.timers.purge(id);
        if let Some(volume) = component.volume {
            self.drop_volume(volume);
        }
        if let Some(owner) = self.hierarchy.get_mut(component.entity) {
            owner.components.retain(|&c| c != id);
            if let Some(slot) = kinds::entry(component.kind()).singleton {
                if slot.get(&owner.wiring) == Some(id) {
                    slot.set(&mut owner.wiring, None);
                }
            }
        }
        Some(component)
    }

    fn drop_volume(&mut self, volume: VolumeId) {
        if self.volumes.remove(volume).is_ok() {
            self.detector.forget(volume);
        }
    }

    // ── Activation ────────────────────────────────────────────────────────

    /// Set a component's activation flag, running the kind's activate or
    /// deactivate hook on a change.  Returns `true` if the flag changed.
    pub fn set_activated(&mut self, id: ComponentId, activated: bool) -> bool {
        let Some(c) = self.component_mut(id) else { return false };
        if !c.activable.set_activated(activated) {
            return false;
        }
        let entry = kinds::entry(c.kind());
        if self.started {
            let hook = if activated { entry.on_activate } else { entry.on_deactivate };
            if let Some(hook) = hook {
                hook(self, id);
            }
        }
        true
    }

    /// Zero a component's activation counter.  A timer loop that stopped on
    /// an exhausted budget starts a fresh cycle.
    pub fn reset_activations(&mut self, id: ComponentId) -> bool {
        let started = self.started;
        let Some(c) = self.component_mut(id) else { return false };
        c.activable.reset_activations();
        if started && c.kind().is_timed() && c.activable.activated && !c.timer.is_armed() {
            self.arm_timer(id);
        }
        true
    }

    /// Overwrite a random input's live probability (clamped to `[0, 1]`).
    pub fn set_probability(&mut self, id: ComponentId, probability: f32) -> bool {
        match self.component_mut(id).map(|c| &mut c.sense) {
            Some(Sense::Random(random)) => {
                random.set_probability(probability);
                true
            }
            _ => false,
        }
    }

    /// Toggle per-component debug logging.
    pub fn set_debug(&mut self, id: ComponentId, debug: bool) -> bool {
        let Some(c) = self.component_mut(id) else { return false };
        c.activable.debug = debug;
        true
    }

    // ── Timers ────────────────────────────────────────────────────────────

    /// Arm every activated timer component.  Idempotent.
    pub(crate) fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        let timed: Vec<ComponentId> = self
            .components()
            .filter(|(_, c)| c.kind().is_timed() && c.activable.activated)
            .map(|(id, _)| id)
            .collect();
        for id in timed {
            self.arm_timer(id);
        }
    }

    /// Start a fresh wait cycle, invalidating any pending entry.
    pub(crate) fn arm_timer(&mut self, id: ComponentId) {
        let now = self.clock.current_tick;
        let Some(c) = self.components.get_mut(id.index()).and_then(Option::as_mut) else {
            return;
        };
        let period = match &c.sense {
            Sense::Periodic(p) => p.period,
            Sense::Random(r) => r.period,
            Sense::EmitParticle(e) => {
                if !e.is_consistent() {
                    warn!(component = %id, "emitter token/period mismatch; emission disabled");
                    return;
                }
                let generation = c.timer.arm();
                for lane in 0..e.stimuli.len() {
                    let entry = TimerEntry { component: id, lane: lane as u16, generation };
                    self.timers.push(now, entry);
                }
                return;
            }
            _ => return,
        };
        let generation = c.timer.arm();
        let wait = period.sample_ticks(&self.clock, &mut c.rng);
        self.timers.push(now + wait, TimerEntry { component: id, lane: 0, generation });
    }

    pub(crate) fn cancel_timer(&mut self, id: ComponentId) {
        if let Some(c) = self.component_mut(id) {
            c.timer.cancel();
        }
    }

    /// Run every timer entry due at the current tick.  Returns how many
    /// belonged to a live cycle.
    pub(crate) fn fire_due_timers(&mut self) -> usize {
        let due = self.timers.drain_due(self.clock.current_tick);
        let mut fired = 0;
        for (_, entry) in due {
            let Some(c) = self.component(entry.component) else { continue };
            if !c.timer.is_current(entry.generation) {
                continue;
            }
            if let Some(on_timer) = kinds::entry(c.kind()).on_timer {
                trace!(component = %entry.component, lane = entry.lane, "timer fired");
                on_timer(self, entry.component, entry.lane);
                fired += 1;
            }
        }
        fired
    }

    // ── Direct routing ────────────────────────────────────────────────────

    /// Deliver `stimulus` to `target`'s direct-connection input.
    pub fn send_direct(&mut self, target: EntityId, stimulus: &str) -> bool {
        let accepted = self.deliver_direct(target, stimulus, Channel::Direct);
        self.flush_commands();
        accepted
    }

    /// Deliver `stimulus` to a direct-connection input component.
    pub fn receive(&mut self, input: ComponentId, stimulus: &str) -> bool {
        let accepted = self.receive_direct(input, stimulus, Channel::Direct);
        self.flush_commands();
        accepted
    }

    /// Fire entry `index` of a direct-connection output.
    pub fn send_output(&mut self, output: ComponentId, index: usize) -> bool {
        let accepted = self.fire_output(output, index);
        self.flush_commands();
        accepted
    }

    /// Fan `stimulus` out through a broadcast output.  Returns how many
    /// receivers accepted it.
    pub fn broadcast(&mut self, output: ComponentId, stimulus: &str) -> usize {
        let accepted = self.fan_out(output, stimulus);
        self.flush_commands();
        accepted
    }

    /// Fan `stimulus` out through `entity`'s broadcast output, if it has one.
    pub fn broadcast_from(&mut self, entity: EntityId, stimulus: &str) -> usize {
        let accepted = self.fan_out_from(entity, stimulus);
        self.flush_commands();
        accepted
    }

    pub(crate) fn deliver_direct(&mut self, target: EntityId, stimulus: &str, channel: Channel) -> bool {
        let Some(input) = self.hierarchy.get(target).and_then(|e| e.wiring.direct_input) else {
            debug!(%target, stimulus, "target has no direct input");
            return false;
        };
        self.receive_direct(input, stimulus, channel)
    }

    fn receive_direct(&mut self, id: ComponentId, stimulus: &str, channel: Channel) -> bool {
        let Some(c) = self.component(id) else { return false };
        let Sense::DirectInput(input) = &c.sense else { return false };
        let entity = c.entity;
        if !c.activable.can_fire() {
            if c.activable.debug {
                debug!(%entity, stimulus, "direct input inactive or out of budget");
            }
            return false;
        }
        if self.config.strict_vocabulary && !self.stimuli.is_valid(stimulus) {
            debug!(%entity, stimulus, "token missing from the stimulus registry");
            return false;
        }
        let Some(index) = input.bindings.index_of(stimulus) else {
            debug!(%entity, stimulus, "token not listened");
            return false;
        };
        if input.rebroadcast {
            match self.hierarchy.get(entity).and_then(|e| e.wiring.broadcast) {
                Some(output) => {
                    self.fan_out(output, stimulus);
                }
                None => warn!(%entity, "rebroadcast requested without a broadcast output"),
            }
        }
        self.fire_bound(id, index, stimulus, channel)
    }

    fn fire_output(&mut self, id: ComponentId, index: usize) -> bool {
        let Some(c) = self.component(id) else { return false };
        let Sense::DirectOutput(output) = &c.sense else { return false };
        let Some((target, token)) = output.entry(index) else {
            debug!(component = %id, index, "direct output entry missing");
            return false;
        };
        let token = token.to_owned();
        self.deliver_direct(target, &token, Channel::Direct)
    }

    // ── Broadcast ─────────────────────────────────────────────────────────

    fn fan_out(&mut self, id: ComponentId, stimulus: &str) -> usize {
        let Some(c) = self.component(id) else { return 0 };
        if !matches!(c.sense, Sense::Broadcast(_)) {
            return 0;
        }
        let owner = c.entity;
        // Snapshot: receivers may despawn entities through queued commands.
        let targets = match self.hierarchy.kind(owner) {
            Some(EntityKind::Root) => self.hierarchy.top_level_systems(),
            Some(EntityKind::System | EntityKind::Smell) => self.hierarchy.children(owner).to_vec(),
            Some(EntityKind::Unit) => {
                debug!(entity = %owner, "broadcast output on a unit is inert");
                return 0;
            }
            None => return 0,
        };
        let mut accepted = 0;
        for target in targets {
            if self.deliver_direct(target, stimulus, Channel::Broadcast) {
                accepted += 1;
            }
        }
        accepted
    }

    fn fan_out_from(&mut self, entity: EntityId, stimulus: &str) -> usize {
        match self.hierarchy.get(entity).and_then(|e| e.wiring.broadcast) {
            Some(output) => self.fan_out(output, stimulus),
            None => {
                debug!(%entity, "entity has no broadcast output");
                0
            }
        }
    }

    // ── Handler invocation ────────────────────────────────────────────────

    /// Consume one activation and invoke the handler set bound at `index`.
    /// Fails without consuming if no handler set exists there.
    pub(crate) fn fire_bound(
        &mut self,
        id: ComponentId,
        index: usize,
        stimulus: &str,
        channel: Channel,
    ) -> bool {
        let tick = self.clock.current_tick;
        let Some(c) = self.components.get_mut(id.index()).and_then(Option::as_mut) else {
            return false;
        };
        let kind = c.kind();
        let bindings = match &mut c.sense {
            Sense::DirectInput(d) => &mut d.bindings,
            Sense::Smell(s) => &mut s.bindings,
            Sense::Vision(v) => &mut v.bindings,
            _ => return false,
        };
        if !bindings.has_handler(index) || !c.activable.try_consume() {
            return false;
        }
        let Some(set) = bindings.handler_mut(index) else { return false };
        let mut queued = Vec::new();
        set.invoke(&mut Firing::new(c.entity, id, tick, Some(stimulus), &mut queued));
        let entity = c.entity;
        if c.activable.debug {
            debug!(%entity, component = %id, stimulus, %channel, "handler set invoked");
        }
        self.pending.extend(queued);
        self.record(entity, id, kind, Some(stimulus), channel);
        true
    }

    /// Invoke a vision input's exit handler set.  No activation is consumed.
    pub(crate) fn fire_exit(&mut self, id: ComponentId, index: usize, stimulus: &str) -> bool {
        let tick = self.clock.current_tick;
        let Some(c) = self.components.get_mut(id.index()).and_then(Option::as_mut) else {
            return false;
        };
        let kind = c.kind();
        let Sense::Vision(vision) = &mut c.sense else { return false };
        let Some(set) = vision.exit_handlers.get_mut(index) else { return false };
        if set.is_empty() {
            return false;
        }
        let mut queued = Vec::new();
        set.invoke(&mut Firing::new(c.entity, id, tick, Some(stimulus), &mut queued));
        let entity = c.entity;
        self.pending.extend(queued);
        self.record(entity, id, kind, Some(stimulus), Channel::VisionExit);
        true
    }

    pub(crate) fn queue(&mut self, commands: Vec<Command>) {
        self.pending.extend(commands);
    }

    pub(crate) fn record(
        &mut self,
        entity: EntityId,
        component: ComponentId,
        kind: SenseKind,
        stimulus: Option<&str>,
        channel: Channel,
    ) {
        self.deliveries.push(Delivery {
            tick: self.clock.current_tick,
            entity,
            component,
            kind,
            stimulus: stimulus.map(str::to_owned),
            channel,
        });
    }

    /// Deliveries recorded since the last call.
    pub fn take_deliveries(&mut self) -> Vec<Delivery> {
        std::mem::take(&mut self.deliveries)
    }

    pub(crate) fn delivery_count(&self) -> usize {
        self.deliveries.len()
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Apply queued handler commands in FIFO order, at most
    /// `max_commands_per_flush` of them.  Returns how many were applied.
    pub fn flush_commands(&mut self) -> usize {
        let mut applied = 0;
        while let Some(command) = self.pending.pop_front() {
            if applied == self.config.max_commands_per_flush {
                self.pending.push_front(command);
                warn!(deferred = self.pending.len(), "command flush limit reached");
                break;
            }
            self.apply(command);
            applied += 1;
        }
        applied
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::SetActivated { component, activated } => {
                self.set_activated(component, activated);
            }
            Command::ResetActivations { component } => {
                self.reset_activations(component);
            }
            Command::SendDirect { target, stimulus } => {
                self.deliver_direct(target, &stimulus, Channel::Direct);
            }
            Command::Broadcast { entity, stimulus } => {
                self.fan_out_from(entity, &stimulus);
            }
            Command::SendOutput { component, index } => {
                self.fire_output(component, index);
            }
            Command::SetProbability { component, probability } => {
                self.set_probability(component, probability);
            }
            Command::SetPosition { entity, position } => {
                self.hierarchy.set_position(entity, position);
            }
            Command::SetParticleDirection { particle, direction } => {
                self.set_particle_direction(particle, direction);
            }
            Command::Despawn { entity } => {
                if let Err(e) = self.remove_entity(entity) {
                    warn!(%entity, error = %e, "despawn rejected");
                }
            }
        }
    }

    // ── Particles ─────────────────────────────────────────────────────────

    /// Spawn a particle stamped with `author` and `stimulus`.
    pub fn emit_particle(
        &mut self,
        author: EntityId,
        stimulus: &str,
        position: Vec3,
        template: &ParticleTemplate,
    ) -> ParticleId {
        let lifetime = self.clock.ticks_for_secs(template.time_alive_secs).max(1);
        let mut particle = Particle::new(template, position, self.clock.current_tick + lifetime);
        particle.init(author, stimulus);
        let id = self.smell.insert(particle);
        let volume = self.volumes.insert(Volume::new(
            VolumeOwner::Particle(id),
            position,
            Shape::sphere(template.collider_radius),
        ));
        if let Some(p) = self.smell.get_mut(id) {
            p.volume = Some(volume);
        }
        trace!(particle = %id, %author, stimulus, "particle emitted");
        id
    }

    /// Destroy a particle and return its token.  Succeeds at most once.
    pub fn consume_particle(&mut self, id: ParticleId) -> Option<String> {
        self.take_particle(id).map(Particle::into_stimulus)
    }

    pub(crate) fn take_particle(&mut self, id: ParticleId) -> Option<Particle> {
        let particle = self.smell.consume(id)?;
        if let Some(volume) = particle.volume {
            self.drop_volume(volume);
        }
        Some(particle)
    }

    pub fn set_particle_direction(&mut self, id: ParticleId, direction: Vec3) -> bool {
        match self.smell.get_mut(id) {
            Some(p) => {
                p.set_direction(direction);
                true
            }
            None => false,
        }
    }

    // ── Per-tick passes ───────────────────────────────────────────────────

    /// Move particles, drop the expired ones, and follow them with their
    /// volumes.
    pub(crate) fn advance_particles(&mut self) {
        let expired = self.smell.advance(self.clock.dt_secs(), self.clock.current_tick);
        for (id, particle) in expired {
            trace!(particle = %id, "particle expired");
            if let Some(volume) = particle.volume {
                self.drop_volume(volume);
            }
        }
        for (_, particle) in self.smell.iter() {
            if let Some(volume) = particle.volume {
                self.volumes.set_center(volume, particle.position);
            }
        }
    }

    /// Move component volumes to their owners and apply enabled tracking.
    pub(crate) fn sync_volumes(&mut self) {
        for c in self.components.iter().flatten() {
            let Some(volume) = c.volume.and_then(|v| self.volumes.get_mut(v)) else { continue };
            if let Some(position) = self.hierarchy.position(c.entity) {
                volume.center = position;
            }
            match c.sense {
                Sense::Presence(_) => {
                    let step = self.toggle.sync(c.activable.activated, volume);
                    if step != ToggleStep::Steady {
                        trace!(entity = %c.entity, ?step, "presence volume toggled");
                    }
                }
                Sense::Smell(_) => volume.enabled = true,
                _ => volume.enabled = c.activable.activated,
            }
        }
    }

    /// Run the overlap detector and dispatch its events in order.
    pub(crate) fn dispatch_overlaps(&mut self) -> usize {
        let events = self.detector.detect(&self.volumes);
        for event in &events {
            let Some(VolumeOwner::Component(id)) = self.volumes.get(event.observer).map(|v| v.owner)
            else {
                continue;
            };
            let Some(kind) = self.component(id).map(Component::kind) else { continue };
            if let Some(on_overlap) = kinds::entry(kind).on_overlap {
                trace!(component = %id, other = %event.other, phase = ?event.phase, "overlap");
                on_overlap(self, id, event.phase, event.other);
            }
        }
        events.len()
    }
}
