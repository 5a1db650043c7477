//! `TimerWheel` — sparse per-tick wake-up queue for timed components.
//!
//! Most components are idle most ticks (waiting out a period).  Instead of
//! polling every component each step, a component registers the tick at
//! which it needs attention next; the simulation drains only the entries due
//! at the current tick — O(due) work instead of O(components).
//!
//! `BTreeMap` gives O(log W) insert and pop where W = number of distinct wake
//! ticks currently enqueued.

use std::collections::BTreeMap;

use sd_core::{ComponentId, Tick};

/// One pending wake-up.
///
/// `lane` distinguishes independent loops inside one component (the
/// per-token loops of a particle emitter); single-loop components use lane 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerEntry {
    pub component: ComponentId,
    pub lane: u16,
    pub generation: u32,
}

/// A priority queue mapping simulation ticks → timer entries due at that tick.
#[derive(Default)]
pub struct TimerWheel {
    inner: BTreeMap<Tick, Vec<TimerEntry>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl TimerWheel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `entry` to fire at `tick`.
    pub fn push(&mut self, tick: Tick, entry: TimerEntry) {
        self.inner.entry(tick).or_default().push(entry);
        self.total += 1;
    }

    /// Remove and return every entry due at or before `now`.
    ///
    /// Entries come back in ascending `(tick, component, lane)` order so the
    /// firing order is independent of insertion order.  Draining everything
    /// up to `now` (not just `now`) means an entry pushed for the current tick
    /// after the drain already ran still fires on the next step.
    pub fn drain_due(&mut self, now: Tick) -> Vec<(Tick, TimerEntry)> {
        let later = self.inner.split_off(&Tick(now.0 + 1));
        let due = std::mem::replace(&mut self.inner, later);

        let mut out = Vec::new();
        for (tick, mut entries) in due {
            entries.sort_unstable_by_key(|e| (e.component, e.lane));
            self.total -= entries.len();
            out.extend(entries.into_iter().map(|e| (tick, e)));
        }
        out
    }

    /// Drop every entry belonging to `component` (used when it is detached).
    ///
    /// Returns the number of entries removed.
    pub fn purge(&mut self, component: ComponentId) -> usize {
        let mut removed = 0;
        self.inner.retain(|_, entries| {
            let before = entries.len();
            entries.retain(|e| e.component != component);
            removed += before - entries.len();
            !entries.is_empty()
        });
        self.total -= removed;
        removed
    }

    /// The earliest tick with at least one queued entry, or `None` if empty.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// Total number of queued entries across all future ticks.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct future ticks that have at least one queued entry.
    pub fn tick_count(&self) -> usize {
        self.inner.len()
    }
}

// ── TimerSlot ─────────────────────────────────────────────────────────────────

/// Per-component cancellation state for entries in the [`TimerWheel`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TimerSlot {
    generation: u32,
    armed: bool,
}

impl TimerSlot {
    /// Start a fresh cycle.  Any entry stamped with an older generation is
    /// invalidated; returns the generation to stamp on new entries.
    pub fn arm(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        self.armed = true;
        self.generation
    }

    /// Cancel the running cycle.  Pending entries will be ignored when drained.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.armed = false;
    }

    /// Mark the loop as finished on its own (budget exhausted).
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// `true` if an entry stamped with `generation` belongs to the live cycle.
    #[inline]
    pub fn is_current(&self, generation: u32) -> bool {
        self.armed && self.generation == generation
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}
