//! The kind table: one row of lifecycle and event hooks per sense kind.
//!
//! Attaching, detaching and dispatching all go through [`entry`], so adding a
//! kind means adding a [`Sense`] variant and one row here.
//!
//! | Kind                               | Singleton     | Activate / deactivate | Event      |
//! |------------------------------------|---------------|-----------------------|------------|
//! | Input Direct Connection            | direct input  | –                     | –          |
//! | Input Periodic / Random Activation | –             | arm / cancel timer    | timer      |
//! | Input Smell                        | –             | –                     | overlap    |
//! | Input Vision Enter / Stay          | –             | –                     | overlap    |
//! | Output Broadcast                   | broadcast     | –                     | –          |
//! | Output Direct Connection           | direct output | –                     | –          |
//! | Output Emit Particle               | –             | arm / cancel timer    | timer      |
//! | Output Presence                    | –             | –                     | –          |
//! | Output Presence Activation         | –             | –                     | overlap    |

use tracing::{debug, trace, warn};

use sd_core::{ComponentId, EntityId, Vec3, VolumeId};
use sd_geometry::{OverlapPhase, VolumeOwner};
use sd_hierarchy::Wiring;
use sd_schedule::TimerEntry;
use sd_sense::{Firing, Sense, SenseKind, TriggerMode};

use crate::{Channel, World};

pub type LifecycleHook = fn(&mut World, ComponentId);
pub type TimerHook = fn(&mut World, ComponentId, u16);
pub type OverlapHook = fn(&mut World, ComponentId, OverlapPhase, VolumeId);

/// Per-entity wiring slot of a kind that is at most one per entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    DirectInput,
    DirectOutput,
    Broadcast,
}

impl Slot {
    pub fn get(self, wiring: &Wiring) -> Option<ComponentId> {
        match self {
            Slot::DirectInput => wiring.direct_input,
            Slot::DirectOutput => wiring.direct_output,
            Slot::Broadcast => wiring.broadcast,
        }
    }

    pub fn set(self, wiring: &mut Wiring, component: Option<ComponentId>) {
        match self {
            Slot::DirectInput => wiring.direct_input = component,
            Slot::DirectOutput => wiring.direct_output = component,
            Slot::Broadcast => wiring.broadcast = component,
        }
    }
}

/// One row of the kind table.
pub struct KindSpec {
    pub kind: SenseKind,
    pub singleton: Option<Slot>,
    pub on_activate: Option<LifecycleHook>,
    pub on_deactivate: Option<LifecycleHook>,
    pub on_timer: Option<TimerHook>,
    pub on_overlap: Option<OverlapHook>,
}

impl KindSpec {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn default_config(&self) -> Sense {
        Sense::default_for(self.kind)
    }
}

const fn row(kind: SenseKind) -> KindSpec {
    KindSpec {
        kind,
        singleton: None,
        on_activate: None,
        on_deactivate: None,
        on_timer: None,
        on_overlap: None,
    }
}

const fn timed(kind: SenseKind, on_timer: TimerHook) -> KindSpec {
    KindSpec {
        on_activate: Some(arm),
        on_deactivate: Some(cancel),
        on_timer: Some(on_timer),
        ..row(kind)
    }
}

const fn single(kind: SenseKind, slot: Slot) -> KindSpec {
    KindSpec { singleton: Some(slot), ..row(kind) }
}

const fn overlap(kind: SenseKind, on_overlap: OverlapHook) -> KindSpec {
    KindSpec { on_overlap: Some(on_overlap), ..row(kind) }
}

/// Rows in [`SenseKind::ALL`] order.
pub static KINDS: [KindSpec; 12] = [
    single(SenseKind::InputDirect, Slot::DirectInput),
    timed(SenseKind::InputPeriodic, periodic_timer),
    timed(SenseKind::InputRandom, random_timer),
    overlap(SenseKind::InputSmell, smell_overlap),
    overlap(SenseKind::InputVisionEnter, vision_overlap),
    overlap(SenseKind::InputVisionStay, vision_overlap),
    single(SenseKind::OutputBroadcast, Slot::Broadcast),
    single(SenseKind::OutputDirect, Slot::DirectOutput),
    timed(SenseKind::OutputEmitParticle, emit_timer),
    row(SenseKind::OutputPresence),
    overlap(SenseKind::OutputPresenceActivationEnter, presence_activation_overlap),
    overlap(SenseKind::OutputPresenceActivationStay, presence_activation_overlap),
];

#[inline]
pub fn entry(kind: SenseKind) -> &'static KindSpec {
    &KINDS[kind as usize]
}

/// Look a row up by its authoring name ("Input Smell", …).
pub fn by_name(name: &str) -> Option<&'static KindSpec> {
    KINDS.iter().find(|k| k.name() == name)
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

fn arm(world: &mut World, id: ComponentId) {
    world.arm_timer(id);
}

fn cancel(world: &mut World, id: ComponentId) {
    world.cancel_timer(id);
}

// ── Timers ────────────────────────────────────────────────────────────────────

fn periodic_timer(world: &mut World, id: ComponentId, _lane: u16) {
    let tick = world.clock.current_tick;
    let Some(c) = world.components.get_mut(id.index()).and_then(Option::as_mut) else { return };
    let Sense::Periodic(input) = &mut c.sense else { return };
    if !c.activable.try_consume() {
        c.timer.disarm();
        return;
    }
    let mut queued = Vec::new();
    input.handlers.invoke(&mut Firing::new(c.entity, id, tick, None, &mut queued));

    if c.activable.has_budget() {
        let wait = input.period.sample_ticks(&world.clock, &mut c.rng);
        let entry = TimerEntry { component: id, lane: 0, generation: c.timer.generation() };
        world.timers.push(tick + wait, entry);
    } else {
        c.timer.disarm();
    }
    let entity = c.entity;
    world.queue(queued);
    world.record(entity, id, SenseKind::InputPeriodic, None, Channel::Periodic);
}

fn random_timer(world: &mut World, id: ComponentId, _lane: u16) {
    let tick = world.clock.current_tick;
    let Some(c) = world.components.get_mut(id.index()).and_then(Option::as_mut) else { return };
    let Sense::Random(input) = &mut c.sense else { return };
    if !c.activable.can_fire() {
        c.timer.disarm();
        return;
    }

    let mut queued = Vec::new();
    if let Some(mut adjusters) = input.adjusters.take() {
        let firing = Firing::new(c.entity, id, tick, None, &mut queued);
        adjusters.invoke(&mut firing.with_probability(input.probability_mut()));
        input.adjusters = Some(adjusters);
    }

    let fired = input.sample(&mut c.rng);
    let mut cooldown = 0.0;
    if fired {
        c.activable.try_consume();
        input.after_success();
        input.handlers.invoke(&mut Firing::new(c.entity, id, tick, None, &mut queued));
        cooldown = input.extra_cooldown_secs;
    } else {
        input.after_failure();
    }
    if c.activable.debug {
        debug!(entity = %c.entity, fired, probability = input.probability(), "random roll");
    }

    if c.activable.has_budget() {
        let wait = world.clock.wait_ticks(cooldown + input.period.sample_secs(&mut c.rng));
        let entry = TimerEntry { component: id, lane: 0, generation: c.timer.generation() };
        world.timers.push(tick + wait, entry);
    } else {
        c.timer.disarm();
    }
    let entity = c.entity;
    world.queue(queued);
    if fired {
        world.record(entity, id, SenseKind::InputRandom, None, Channel::Random);
    }
}

fn emit_timer(world: &mut World, id: ComponentId, lane: u16) {
    let tick = world.clock.current_tick;
    let Some(c) = world.components.get_mut(id.index()).and_then(Option::as_mut) else { return };
    let Sense::EmitParticle(output) = &c.sense else { return };
    let index = usize::from(lane);
    let (Some(token), Some(&period)) = (output.stimuli.get(index), output.periods_secs.get(index))
    else {
        return;
    };
    let token = token.clone();
    let template = output.template;
    let radius = output.emission_radius;
    if !c.activable.try_consume() {
        c.timer.disarm();
        return;
    }

    let offset = c.rng.point_in_sphere(radius);
    if c.activable.has_budget() {
        let entry = TimerEntry { component: id, lane, generation: c.timer.generation() };
        world.timers.push(tick + world.clock.wait_ticks(period), entry);
    } else {
        c.timer.disarm();
    }
    let author = c.entity;
    let origin = world.hierarchy.position(author).unwrap_or(Vec3::ZERO);
    world.emit_particle(author, &token, origin + offset, &template);
}

// ── Overlaps ──────────────────────────────────────────────────────────────────

/// Owner entity and token of the single-token output behind `volume`.
fn single_token_source(
    world: &World,
    volume: VolumeId,
    presence_only: bool,
) -> Option<(EntityId, String)> {
    let id = world.volumes.get(volume)?.owner.component()?;
    let c = world.component(id)?;
    if presence_only && !matches!(c.sense, Sense::Presence(_)) {
        return None;
    }
    c.sense.single_token().map(|token| (c.entity, token.to_owned()))
}

fn reacts(mode: TriggerMode, phase: OverlapPhase) -> bool {
    matches!(
        (mode, phase),
        (TriggerMode::Enter, OverlapPhase::Enter)
            | (TriggerMode::Stay, OverlapPhase::Enter | OverlapPhase::Stay)
    )
}

fn smell_overlap(world: &mut World, id: ComponentId, phase: OverlapPhase, other: VolumeId) {
    if phase != OverlapPhase::Enter {
        return;
    }
    let Some(VolumeOwner::Particle(particle)) = world.volumes.get(other).map(|v| v.owner) else {
        return;
    };
    let Some(c) = world.component(id) else { return };
    if !c.activable.can_fire() {
        return;
    }
    let entity = c.entity;
    // Consumed earlier this tick by another smeller.
    let Some(author) = world.smell.get(particle).and_then(|p| p.author()) else { return };
    if author == entity {
        return;
    }

    let Some(token) = world.take_particle(particle).map(|p| p.into_stimulus()) else { return };
    let index = world.component(id).and_then(|c| match &c.sense {
        Sense::Smell(smell) => smell.bindings.index_of(&token),
        _ => None,
    });
    match index {
        Some(index) => {
            trace!(%entity, %particle, stimulus = %token, "particle smelled");
            if !world.fire_bound(id, index, &token, Channel::Smell) {
                warn!(%entity, stimulus = %token, "smell has no handler set for a listened token");
            }
        }
        None => debug!(%entity, stimulus = %token, "smelled token not listened"),
    }
}

fn vision_overlap(world: &mut World, id: ComponentId, phase: OverlapPhase, other: VolumeId) {
    let Some(c) = world.component(id) else { return };
    let Sense::Vision(vision) = &c.sense else { return };
    let exit = vision.mode == TriggerMode::Enter && phase == OverlapPhase::Exit;
    if !exit && !reacts(vision.mode, phase) {
        return;
    }
    if !exit && !c.activable.can_fire() {
        return;
    }
    let Some((seen, token)) = single_token_source(world, other, false) else { return };
    let Some(index) = vision.bindings.index_of(&token) else { return };
    let entity = c.entity;
    if seen == entity {
        warn!(%entity, stimulus = %token, "vision ignored its own entity's output");
        return;
    }

    if exit {
        if c.activable.activated {
            world.fire_exit(id, index, &token);
        }
        return;
    }
    if !world.fire_bound(id, index, &token, Channel::Vision) {
        warn!(%entity, stimulus = %token, "vision has no handler set for a listened token");
    }
}

fn presence_activation_overlap(
    world: &mut World,
    id: ComponentId,
    phase: OverlapPhase,
    other: VolumeId,
) {
    let Some(c) = world.component(id) else { return };
    let Sense::PresenceActivation(output) = &c.sense else { return };
    if !reacts(output.mode, phase) || !c.activable.can_fire() {
        return;
    }
    let Some((target, token)) = single_token_source(world, other, true) else { return };
    let entity = c.entity;
    if !output.allows(&token) {
        return;
    }
    if target == entity {
        warn!(%entity, stimulus = %token, "presence activation ignored its own entity's presence");
        return;
    }

    let own = output.stimulus.clone();
    if world.deliver_direct(target, &own, Channel::Presence) {
        if let Some(c) = world.components.get_mut(id.index()).and_then(Option::as_mut) {
            c.activable.try_consume();
        }
    }
}
