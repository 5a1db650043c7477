//! `sd-geometry` — detection volumes and overlap events.
//!
//! The stimulus engine never computes contacts itself; it hands volumes to an
//! [`OverlapDetector`] once per tick and consumes the `Enter`/`Stay`/`Exit`
//! events it reports.  This crate defines that boundary plus a reference
//! detector good enough for tests and demos.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`shape`]    | `Shape` (sphere, vertical capsule, box, mesh bounds)       |
//! | [`volume`]   | `Volume`, `VolumeOwner`, `VolumeSet` (generational arena)  |
//! | [`collapse`] | `VolumeCollapse` — shrink to zero / restore hook           |
//! | [`overlap`]  | `OverlapDetector` trait, `OverlapEvent`, `SweepDetector`   |
//! | [`error`]    | `GeometryError`, `GeometryResult<T>`                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Shape`.                |

pub mod collapse;
pub mod error;
pub mod overlap;
pub mod shape;
pub mod volume;

#[cfg(test)]
mod tests;

pub use collapse::VolumeCollapse;
pub use error::{GeometryError, GeometryResult};
pub use overlap::{OverlapDetector, OverlapEvent, OverlapPhase, SweepDetector};
pub use shape::Shape;
pub use volume::{Volume, VolumeOwner, VolumeSet};
