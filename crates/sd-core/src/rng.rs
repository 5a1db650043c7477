//! Deterministic per-component and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each component gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (component_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive component IDs uniformly across the seed space.
//! Timer jitter, activation rolls and particle spawn offsets of one component
//! therefore never depend on how many other components drew numbers first.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{ComponentId, Vec3};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── ComponentRng ──────────────────────────────────────────────────────────────

/// Per-component deterministic RNG.
pub struct ComponentRng(SmallRng);

impl ComponentRng {
    /// Seed deterministically from the run's global seed and a component ID.
    pub fn new(global_seed: u64, component: ComponentId) -> Self {
        let seed = global_seed ^ (component.0 as u64).wrapping_mul(MIXING_CONSTANT);
        ComponentRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Uniform `f32` in `[0, max]`; zero when `max` is not positive.
    #[inline]
    pub fn up_to(&mut self, max: f32) -> f32 {
        if max > 0.0 { self.0.gen_range(0.0..=max) } else { 0.0 }
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// A random point inside a sphere of `radius` around the origin.
    ///
    /// Picks a direction from the unit cube, normalizes it, and scales it by a
    /// uniform distance in `[0, radius]`.
    pub fn point_in_sphere(&mut self, radius: f32) -> Vec3 {
        if radius <= 0.0 {
            return Vec3::ZERO;
        }
        let dir = Vec3::new(
            self.0.gen_range(-1.0..=1.0),
            self.0.gen_range(-1.0..=1.0),
            self.0.gen_range(-1.0..=1.0),
        )
        .normalized();
        dir * self.up_to(radius)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations (demo population setup,
/// exogenous events, etc.).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
