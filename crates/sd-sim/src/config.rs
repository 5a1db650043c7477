//! World configuration loaded from TOML.
//!
//! Every field has a default, so an empty document is a valid config:
//!
//! ```toml
//! presence_toggle = "shrink_restore"   # or "immediate"
//! strict_vocabulary = false
//! max_commands_per_flush = 10000
//! stimuli = ["Food", "Danger"]
//!
//! [sim]
//! tick_duration_ms = 20
//! total_ticks = 3000
//! seed = 42
//! trace_interval_ticks = 1
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use sd_core::SimConfig;
use sd_sense::PresenceStrategy;

use crate::{SimError, SimResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub sim: SimConfig,
    pub presence_toggle: PresenceStrategy,
    /// Reject direct deliveries of tokens missing from the registry.
    pub strict_vocabulary: bool,
    /// Upper bound on handler commands applied per flush.  Leftovers stay
    /// queued for the next flush.
    pub max_commands_per_flush: usize,
    /// Initial stimulus vocabulary, in registry order.
    pub stimuli: Vec<String>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            presence_toggle: PresenceStrategy::default(),
            strict_vocabulary: false,
            max_commands_per_flush: 10_000,
            stimuli: Vec::new(),
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.sim.tick_duration_ms == 0 {
            return Err(SimError::Config("tick_duration_ms must be positive".into()));
        }
        if self.max_commands_per_flush == 0 {
            return Err(SimError::Config("max_commands_per_flush must be positive".into()));
        }
        Ok(())
    }
}

/// Parse and validate a TOML document.
pub fn parse_config(text: &str) -> SimResult<WorldConfig> {
    let config: WorldConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a TOML file.
pub fn load_config(path: impl AsRef<Path>) -> SimResult<WorldConfig> {
    let text = std::fs::read_to_string(path)?;
    parse_config(&text)
}
