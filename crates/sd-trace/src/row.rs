//! Plain data rows written by trace backends.

use sd_sim::{Delivery, TickStats};

/// One handler-set invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryRow {
    pub tick:       u64,
    pub elapsed_ms: u64,
    pub entity:     u32,
    pub component:  u32,
    /// Authoring name of the receiving component's kind.
    pub kind:       &'static str,
    /// Empty for timer-driven inputs.
    pub stimulus:   String,
    pub channel:    &'static str,
}

impl DeliveryRow {
    pub fn from_delivery(delivery: &Delivery, tick_duration_ms: u32) -> Self {
        Self {
            tick:       delivery.tick.0,
            elapsed_ms: delivery.tick.0 * u64::from(tick_duration_ms),
            entity:     delivery.entity.0,
            component:  delivery.component.0,
            kind:       delivery.kind.name(),
            stimulus:   delivery.stimulus.clone().unwrap_or_default(),
            channel:    delivery.channel.as_str(),
        }
    }
}

/// Counters for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:             u64,
    pub elapsed_ms:       u64,
    pub timers_fired:     u64,
    pub overlap_events:   u64,
    pub deliveries:       u64,
    pub commands_applied: u64,
    pub particles_alive:  u64,
}

impl TickSummaryRow {
    pub fn from_stats(stats: &TickStats, tick_duration_ms: u32) -> Self {
        Self {
            tick:             stats.tick.0,
            elapsed_ms:       stats.tick.0 * u64::from(tick_duration_ms),
            timers_fired:     stats.timers_fired as u64,
            overlap_events:   stats.overlap_events as u64,
            deliveries:       stats.deliveries as u64,
            commands_applied: stats.commands_applied as u64,
            particles_alive:  stats.particles_alive as u64,
        }
    }
}
