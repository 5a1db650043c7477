//! Observer hooks and the records they receive.

use std::fmt;

use sd_core::{ComponentId, EntityId, Tick};
use sd_sense::SenseKind;

/// Route by which a handler set was reached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// `send_direct`, a direct-connection output, or a handler command.
    Direct,
    /// Fan-out from a broadcast output.
    Broadcast,
    /// A presence-activation output touching a presence.
    Presence,
    Periodic,
    Random,
    Smell,
    Vision,
    VisionExit,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Direct => "direct",
            Channel::Broadcast => "broadcast",
            Channel::Presence => "presence",
            Channel::Periodic => "periodic",
            Channel::Random => "random",
            Channel::Smell => "smell",
            Channel::Vision => "vision",
            Channel::VisionExit => "vision-exit",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One handler-set invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct Delivery {
    pub tick: Tick,
    /// Entity owning the receiving component.
    pub entity: EntityId,
    pub component: ComponentId,
    pub kind: SenseKind,
    /// `None` for timer-driven inputs.
    pub stimulus: Option<String>,
    pub channel: Channel,
}

/// Per-tick counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    pub tick: Tick,
    pub timers_fired: usize,
    pub overlap_events: usize,
    pub deliveries: usize,
    pub commands_applied: usize,
    pub particles_alive: usize,
}

/// Callbacks invoked by [`Sim`](crate::Sim) at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: delivery counter
///
/// ```rust,ignore
/// struct Counter(usize);
///
/// impl SimObserver for Counter {
///     fn on_delivery(&mut self, _d: &Delivery) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per handler-set invocation, in invocation order, after the
    /// tick's processing is complete.
    fn on_delivery(&mut self, _delivery: &Delivery) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Collects every delivery in memory.  Handy for tests and small demos.
#[derive(Debug, Default)]
pub struct DeliveryLog {
    pub deliveries: Vec<Delivery>,
    pub ticks: Vec<TickStats>,
}

impl DeliveryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliveries received by `entity`.
    pub fn for_entity(&self, entity: EntityId) -> impl Iterator<Item = &Delivery> + '_ {
        self.deliveries.iter().filter(move |d| d.entity == entity)
    }
}

impl SimObserver for DeliveryLog {
    fn on_delivery(&mut self, delivery: &Delivery) {
        self.deliveries.push(delivery.clone());
    }

    fn on_tick_end(&mut self, _tick: Tick, stats: &TickStats) {
        self.ticks.push(*stats);
    }
}
