//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter advanced
//! once per fixed simulation step.  The mapping to simulated seconds is held
//! in `SimClock`:
//!
//!   elapsed_secs = tick * tick_duration_ms / 1000
//!
//! Authored durations (periods, lifetimes, cooldowns) are given in seconds as
//! `f32`.  They are rounded to whole milliseconds before being divided by the
//! tick duration, so `3.0 s` at `100 ms` per tick is exactly 30 ticks rather
//! than 31 after floating-point drift.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated seconds.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many simulated milliseconds one tick represents.
    pub tick_duration_ms: u32,
    /// The current tick — advanced by `SimClock::advance()` each step.
    pub current_tick: Tick,
}

impl SimClock {
    /// Create a clock at tick 0 with the given step length.
    ///
    /// A zero step length is bumped to 1 ms so tick arithmetic never divides
    /// by zero.
    pub fn new(tick_duration_ms: u32) -> Self {
        Self {
            tick_duration_ms: tick_duration_ms.max(1),
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Length of one step in seconds (the `dt` used for particle motion).
    #[inline]
    pub fn dt_secs(&self) -> f32 {
        self.tick_duration_ms as f32 / 1000.0
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.tick_duration_ms as f64 / 1000.0
    }

    // ── Tick-count helpers ────────────────────────────────────────────────

    /// How many ticks span `secs` seconds? (rounds up — a timer never fires early)
    ///
    /// Negative and non-finite durations count as zero.
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        if !secs.is_finite() || secs <= 0.0 {
            return 0;
        }
        let ms = (secs as f64 * 1000.0).round() as u64;
        ms.div_ceil(self.tick_duration_ms as u64)
    }

    /// Like [`ticks_for_secs`](Self::ticks_for_secs) but never less than one
    /// tick.  Used for every cooperative wait so a zero-length period cannot
    /// spin inside a single step.
    #[inline]
    pub fn wait_ticks(&self, secs: f32) -> u64 {
        self.ticks_for_secs(secs).max(1)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3} s)", self.current_tick, self.elapsed_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically embedded in the world config loaded by `sd-sim` from TOML.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Milliseconds per tick.  Default: 20 (a 50 Hz fixed step).
    pub tick_duration_ms: u32,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Report tick summaries every N ticks.  0 disables summaries.
    pub trace_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_ms: 20,
            total_ticks: 3_000,
            seed: 42,
            trace_interval_ticks: 1,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_ms)
    }
}
