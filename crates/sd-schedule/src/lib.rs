//! `sd-schedule` — cooperative timers for periodic, random and emission loops.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`timer`]  | `TimerWheel` (`BTreeMap<Tick, Vec<TimerEntry>>`), `TimerSlot`   |
//! | [`period`] | `Period` — base wait plus uniform random extra                  |
//!
//! # Cancellation model (summary)
//!
//! A timed component owns a `TimerSlot`.  Starting a cycle bumps the slot's
//! generation and stamps it on every entry pushed into the wheel; cancelling
//! bumps it again.  When the wheel drains an entry whose generation no longer
//! matches its slot, the entry is dropped unfired:
//!
//! ```text
//! arm()    → generation 1, entry(T+5, gen 1) pushed
//! cancel() → generation 2
//! T+5      → entry drained, gen 1 != 2 → ignored
//! ```
//!
//! Cancellation is therefore a flag check, never a search through the wheel.

pub mod period;
pub mod timer;

#[cfg(test)]
mod tests;

pub use period::Period;
pub use timer::{TimerEntry, TimerSlot, TimerWheel};
