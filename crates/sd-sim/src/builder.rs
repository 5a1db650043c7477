//! Fluent builder for constructing a [`Sim`].

use sd_core::SimConfig;
use sd_geometry::{OverlapDetector, SweepDetector};
use sd_sense::PresenceStrategy;

use crate::{Sim, SimResult, World, WorldConfig};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method                     | Default                      |
/// |----------------------------|------------------------------|
/// | `.sim_config(c)`           | `SimConfig::default()`       |
/// | `.detector(d)`             | `SweepDetector`              |
/// | `.presence_toggle(s)`      | `PresenceStrategy::ShrinkRestore` |
/// | `.strict_vocabulary(b)`    | `false`                      |
/// | `.stimuli(tokens)`         | empty vocabulary             |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .stimuli(["Food", "Danger"])
///     .build()?;
/// let forest = sim.world.add_system(sim.world.root(), "Forest", "forest")?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config: WorldConfig,
    detector: Option<Box<dyn OverlapDetector>>,
}

impl SimBuilder {
    pub fn new(config: WorldConfig) -> Self {
        Self { config, detector: None }
    }

    pub fn sim_config(mut self, sim: SimConfig) -> Self {
        self.config.sim = sim;
        self
    }

    /// Replace the reference overlap collaborator.
    pub fn detector<D: OverlapDetector + 'static>(mut self, detector: D) -> Self {
        self.detector = Some(Box::new(detector));
        self
    }

    pub fn presence_toggle(mut self, strategy: PresenceStrategy) -> Self {
        self.config.presence_toggle = strategy;
        self
    }

    pub fn strict_vocabulary(mut self, strict: bool) -> Self {
        self.config.strict_vocabulary = strict;
        self
    }

    /// Append tokens to the initial vocabulary.
    pub fn stimuli<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.stimuli.extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Validate the config and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let detector = self.detector.unwrap_or_else(|| Box::new(SweepDetector::new()));
        Ok(Sim::new(World::with_detector(self.config, detector)))
    }
}
