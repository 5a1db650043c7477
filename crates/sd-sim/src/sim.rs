//! The `Sim` struct and its tick loop.

use tracing::trace;

use sd_core::Tick;

use crate::{SimObserver, SimResult, TickStats, World};

/// The main simulation runner.
///
/// `Sim` owns the [`World`] and drives one fixed step per tick:
///
/// 1. **Start**: on the very first step, arm every activated timer component.
/// 2. **Timers**: drain due entries in ascending (tick, component, lane)
///    order; periodic, random and emitter loops fire here.
/// 3. **Particles**: move live particles by `direction * dt`, expire the
///    ones whose lifetime ran out.
/// 4. **Volumes**: follow owners, mirror `activated` into enabled flags, run
///    the presence toggle.
/// 5. **Overlaps**: run the detector and dispatch its events in order.
/// 6. **Commands**: handler commands are flushed after phases 2 and 5.
/// 7. **Report**: deliveries and [`TickStats`] go to the observer.
///
/// Create via [`SimBuilder`][crate::SimBuilder] or [`Sim::new`].
pub struct Sim {
    pub world: World,
}

impl Sim {
    pub fn new(world: World) -> Self {
        Self { world }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.sim.end_tick()`.
    ///
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let end = self.world.config.sim.end_tick();
        while self.world.clock.current_tick < end {
            self.step(observer);
        }
        observer.on_sim_end(self.world.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    /// Process the current tick, report it, and advance the clock.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> TickStats {
        let now = self.world.clock.current_tick;
        observer.on_tick_start(now);
        let stats = self.process_tick(now);
        for delivery in self.world.take_deliveries() {
            observer.on_delivery(&delivery);
        }
        observer.on_tick_end(now, &stats);
        self.world.clock.advance();
        stats
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> TickStats {
        let world = &mut self.world;
        world.start();

        let timers_fired = world.fire_due_timers();
        let mut commands_applied = world.flush_commands();

        world.advance_particles();
        world.sync_volumes();

        let overlap_events = world.dispatch_overlaps();
        commands_applied += world.flush_commands();

        let stats = TickStats {
            tick: now,
            timers_fired,
            overlap_events,
            deliveries: world.delivery_count(),
            commands_applied,
            particles_alive: world.smell_field().len(),
        };
        trace!(?stats, "tick processed");
        stats
    }
}
