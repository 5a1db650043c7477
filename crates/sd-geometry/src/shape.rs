//! Detection-volume shapes.
//!
//! Every shape is reduced to a *rounded box*: an axis-aligned core with
//! `core_half_extents`, inflated in every direction by `round_radius`.
//!
//! | Shape     | core half-extents              | round radius |
//! |-----------|--------------------------------|--------------|
//! | `Sphere`  | zero                           | `radius`     |
//! | `Capsule` | `(0, max(h/2 - r, 0), 0)`      | `radius`     |
//! | `Box`     | `size / 2`                     | 0            |
//! | `Mesh`    | `bounds * scale / 2`           | 0            |
//!
//! Capsules are vertical (Y axis), boxes and mesh bounds are axis-aligned.
//! The distance between two rounded boxes is the distance between their
//! cores minus both radii, which is exact for every pair above.

use sd_core::Vec3;

use crate::{GeometryError, GeometryResult};

/// Extent of a detection volume, centered on the volume's position.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Shape {
    Sphere { radius: f32 },
    /// Vertical capsule; `height` is the full tip-to-tip length.
    Capsule { radius: f32, height: f32 },
    Box { size: Vec3 },
    /// Mesh approximated by its local bounding box, scaled uniformly.
    Mesh { bounds: Vec3, scale: f32 },
}

impl Default for Shape {
    fn default() -> Self {
        Shape::Sphere { radius: 1.0 }
    }
}

impl Shape {
    pub fn sphere(radius: f32) -> Self {
        Shape::Sphere { radius }
    }

    pub fn capsule(radius: f32, height: f32) -> Self {
        Shape::Capsule { radius, height }
    }

    pub fn cuboid(size: Vec3) -> Self {
        Shape::Box { size }
    }

    pub fn mesh(bounds: Vec3) -> Self {
        Shape::Mesh { bounds, scale: 1.0 }
    }

    /// Reject negative or non-finite dimensions.
    pub fn validate(&self) -> GeometryResult<()> {
        let dims: [f32; 4] = match *self {
            Shape::Sphere { radius } => [radius, 0.0, 0.0, 0.0],
            Shape::Capsule { radius, height } => [radius, height, 0.0, 0.0],
            Shape::Box { size } => [size.x, size.y, size.z, 0.0],
            Shape::Mesh { bounds, scale } => [bounds.x, bounds.y, bounds.z, scale],
        };
        if dims.iter().all(|d| d.is_finite() && *d >= 0.0) {
            Ok(())
        } else {
            Err(GeometryError::InvalidShape(format!("{self:?}")))
        }
    }

    /// The same shape with every extent set to zero.
    ///
    /// Meshes keep their bounds and zero the scale, so restoring only has to
    /// put the scale back.
    pub fn collapsed(&self) -> Shape {
        match *self {
            Shape::Sphere { .. } => Shape::Sphere { radius: 0.0 },
            Shape::Capsule { .. } => Shape::Capsule { radius: 0.0, height: 0.0 },
            Shape::Box { .. } => Shape::Box { size: Vec3::ZERO },
            Shape::Mesh { bounds, .. } => Shape::Mesh { bounds, scale: 0.0 },
        }
    }

    /// Half-extents of the axis-aligned core.
    pub fn core_half_extents(&self) -> Vec3 {
        match *self {
            Shape::Sphere { .. } => Vec3::ZERO,
            Shape::Capsule { radius, height } => {
                Vec3::new(0.0, (height * 0.5 - radius).max(0.0), 0.0)
            }
            Shape::Box { size } => size.abs() * 0.5,
            Shape::Mesh { bounds, scale } => bounds.abs() * (scale.abs() * 0.5),
        }
    }

    /// Inflation applied around the core.
    pub fn round_radius(&self) -> f32 {
        match *self {
            Shape::Sphere { radius } | Shape::Capsule { radius, .. } => radius.max(0.0),
            Shape::Box { .. } | Shape::Mesh { .. } => 0.0,
        }
    }

    /// Half-extents of the full axis-aligned bounding box.
    pub fn bounding_half_extents(&self) -> Vec3 {
        let core = self.core_half_extents();
        core + Vec3::splat(self.round_radius())
    }

    /// `true` if the shape encloses no space at all.  Degenerate volumes never
    /// overlap anything.
    pub fn is_degenerate(&self) -> bool {
        self.round_radius() == 0.0 && self.core_half_extents().is_zero()
    }
}
