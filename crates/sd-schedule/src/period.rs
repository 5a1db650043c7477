//! Jittered wait durations.

use sd_core::{ComponentRng, SimClock};

/// A wait of `base_secs + uniform(0, extra_random_secs)` seconds.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period {
    pub base_secs: f32,
    pub extra_random_secs: f32,
}

impl Period {
    pub fn new(base_secs: f32, extra_random_secs: f32) -> Self {
        Self { base_secs, extra_random_secs }
    }

    /// A period with no random component.
    pub fn fixed(secs: f32) -> Self {
        Self::new(secs, 0.0)
    }

    /// Draw one wait duration in seconds.
    pub fn sample_secs(&self, rng: &mut ComponentRng) -> f32 {
        self.base_secs.max(0.0) + rng.up_to(self.extra_random_secs)
    }

    /// Draw one wait duration in whole ticks (at least one).
    pub fn sample_ticks(&self, clock: &SimClock, rng: &mut ComponentRng) -> u64 {
        clock.wait_ticks(self.sample_secs(rng))
    }
}
