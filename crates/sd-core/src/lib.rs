//! `sd-core` — foundational types for the systemic-design stimulus engine.
//!
//! This crate is a dependency of every other `sd-*` crate.  It has no `sd-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`ids`]         | `EntityId`, `ComponentId`, `ParticleId`, `VolumeId`      |
//! | [`geo`]         | `Vec3` world-space vector                                |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                          |
//! | [`rng`]         | `ComponentRng` (per-component), `SimRng` (global)        |
//! | [`stimulus`]    | `StimulusRegistry` — the world's token vocabulary        |
//! | [`error`]       | `SdError`, `SdResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod stimulus;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SdError, SdResult};
pub use geo::Vec3;
pub use ids::{ComponentId, EntityId, ParticleId, VolumeId};
pub use rng::{ComponentRng, SimRng};
pub use stimulus::StimulusRegistry;
pub use time::{SimClock, SimConfig, Tick};
