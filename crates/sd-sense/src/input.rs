//! Input strategies: how an entity receives stimuli.
//!
//! These types hold configuration and per-strategy state only.  The routing
//! itself (budget gating, self-stimulation checks, handler invocation) is
//! driven by the world, which owns the component arena.

use sd_core::ComponentRng;
use sd_geometry::Shape;
use sd_schedule::Period;

use crate::{HandlerSet, StimulusBindings};

/// Which overlap edges an overlap-driven sense reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TriggerMode {
    /// Once per overlap-begin edge.
    Enter,
    /// Every tick the overlap persists, including the first.
    Stay,
}

// ── DirectInput ───────────────────────────────────────────────────────────────

/// Point-to-point receiver.  At most one per entity.
#[derive(Debug, Default)]
pub struct DirectInput {
    pub bindings: StimulusBindings,
    /// Re-emit every accepted token through the owner's broadcast output.
    pub rebroadcast: bool,
}

impl DirectInput {
    pub fn new(bindings: StimulusBindings) -> Self {
        Self { bindings, rebroadcast: false }
    }

    pub fn with_rebroadcast(mut self, rebroadcast: bool) -> Self {
        self.rebroadcast = rebroadcast;
        self
    }
}

// ── PeriodicInput ─────────────────────────────────────────────────────────────

/// Fires its handler set every `period` while activated.
#[derive(Debug, Default)]
pub struct PeriodicInput {
    pub period: Period,
    pub handlers: HandlerSet,
}

impl PeriodicInput {
    pub fn new(period: Period, handlers: HandlerSet) -> Self {
        Self { period, handlers }
    }
}

// ── RandomInput ───────────────────────────────────────────────────────────────

/// A periodic input that only fires with a (rising) probability.
///
/// Every failed roll raises the probability by `increasing_probability`,
/// capped at 1.  A successful roll optionally resets it to the value it had
/// when the component was attached, and adds `extra_cooldown_secs` to the
/// next wait.
#[derive(Debug)]
pub struct RandomInput {
    pub period: Period,
    pub handlers: HandlerSet,
    pub extra_cooldown_secs: f32,
    pub reset_after_activation: bool,
    /// Probability adjusters, run before every roll with live access to the
    /// probability.
    pub adjusters: Option<HandlerSet>,
    probability: f32,
    increasing_probability: f32,
    initial_probability: f32,
}

impl Default for RandomInput {
    fn default() -> Self {
        Self::new(Period::default(), HandlerSet::new(), 0.5)
    }
}

impl RandomInput {
    pub fn new(period: Period, handlers: HandlerSet, probability: f32) -> Self {
        let probability = clamp_unit(probability);
        let mut input = Self {
            period,
            handlers,
            extra_cooldown_secs: 0.0,
            reset_after_activation: true,
            adjusters: None,
            probability,
            increasing_probability: 0.0,
            initial_probability: probability,
        };
        input.set_increasing_probability(0.05);
        input
    }

    pub fn with_increase(mut self, increase: f32) -> Self {
        self.set_increasing_probability(increase);
        self
    }

    pub fn with_cooldown(mut self, secs: f32) -> Self {
        self.extra_cooldown_secs = secs;
        self
    }

    pub fn with_reset(mut self, reset_after_activation: bool) -> Self {
        self.reset_after_activation = reset_after_activation;
        self
    }

    pub fn with_adjusters(mut self, adjusters: HandlerSet) -> Self {
        self.adjusters = Some(adjusters);
        self
    }

    #[inline]
    pub fn probability(&self) -> f32 {
        self.probability
    }

    /// Set the live probability, clamped to `[0, 1]`.
    pub fn set_probability(&mut self, probability: f32) {
        self.probability = clamp_unit(probability);
    }

    /// Live probability for adjusters.  Re-clamped by [`sample`](Self::sample).
    pub fn probability_mut(&mut self) -> &mut f32 {
        &mut self.probability
    }

    #[inline]
    pub fn increasing_probability(&self) -> f32 {
        self.increasing_probability
    }

    /// Set the per-failure increase, bounded by the headroom left above the
    /// current probability.
    pub fn set_increasing_probability(&mut self, increase: f32) {
        let headroom = 1.0 - self.probability;
        self.increasing_probability = if increase.is_nan() { 0.0 } else { increase.clamp(0.0, headroom) };
    }

    #[inline]
    pub fn initial_probability(&self) -> f32 {
        self.initial_probability
    }

    /// Record the current probability as the reset target.
    pub fn snapshot_initial(&mut self) {
        self.initial_probability = self.probability;
    }

    /// Roll against the current probability.
    pub fn sample(&mut self, rng: &mut ComponentRng) -> bool {
        self.probability = clamp_unit(self.probability);
        rng.gen_bool(self.probability as f64)
    }

    pub fn after_success(&mut self) {
        if self.reset_after_activation {
            self.probability = self.initial_probability;
        }
    }

    pub fn after_failure(&mut self) {
        self.probability = (self.probability + self.increasing_probability).min(1.0);
    }
}

fn clamp_unit(p: f32) -> f32 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

// ── SmellInput ────────────────────────────────────────────────────────────────

/// Consumes scent particles entering a sphere around the owner.
#[derive(Debug)]
pub struct SmellInput {
    pub radius: f32,
    pub bindings: StimulusBindings,
}

impl Default for SmellInput {
    fn default() -> Self {
        Self { radius: 1.0, bindings: StimulusBindings::new() }
    }
}

impl SmellInput {
    pub fn new(radius: f32, bindings: StimulusBindings) -> Self {
        Self { radius, bindings }
    }

    pub fn shape(&self) -> Shape {
        Shape::sphere(self.radius)
    }
}

// ── VisionInput ───────────────────────────────────────────────────────────────

/// Reacts to single-token outputs (presences) of other entities overlapping
/// its volume.
#[derive(Debug)]
pub struct VisionInput {
    pub mode: TriggerMode,
    pub shape: Shape,
    pub bindings: StimulusBindings,
    /// Exit handler sets aligned with `bindings`; used in `Enter` mode only.
    pub exit_handlers: Vec<HandlerSet>,
}

impl VisionInput {
    pub fn new(mode: TriggerMode, shape: Shape) -> Self {
        Self {
            mode,
            shape,
            bindings: StimulusBindings::new(),
            exit_handlers: Vec::new(),
        }
    }

    /// Listen to `token`; its exit slot gets an empty handler set.
    pub fn listen(mut self, token: &str, handlers: HandlerSet) -> Self {
        self.bindings = self.bindings.listen(token, handlers);
        self.exit_handlers.push(HandlerSet::new());
        self
    }

    /// Listen to `token` with both an enter and an exit handler set.
    pub fn listen_with_exit(mut self, token: &str, enter: HandlerSet, exit: HandlerSet) -> Self {
        self.bindings = self.bindings.listen(token, enter);
        self.exit_handlers.push(exit);
        self
    }
}
