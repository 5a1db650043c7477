//! Toggling a presence volume so observers see an exit.
//!
//! With an edge-only overlap collaborator, disabling a volume ends its
//! contacts silently.  `ShrinkRestore` works around this in two ticks:
//!
//! ```text
//! activated: true → false
//! tick N   : enabled, not collapsed → collapse (observers get Exit)
//! tick N+1 : enabled, collapsed     → restore, enabled = false
//! ```
//!
//! Any other state just mirrors `activated` into `enabled`, restoring first
//! if a reactivation interrupted the sequence.

use sd_geometry::Volume;

/// How a presence volume follows its component's activation flag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PresenceStrategy {
    /// Two-phase shrink/restore for edge-only collaborators.
    #[default]
    ShrinkRestore,
    /// Mirror `activated` into `enabled` directly.
    Immediate,
}

/// What a sync pass did to the volume.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ToggleStep {
    /// Enabled flag mirrored, nothing else.
    Steady,
    /// Shrunk to zero extent.
    Collapsed,
    /// Authored extent put back.
    Restored,
}

/// Applies a [`PresenceStrategy`] once per tick.
#[derive(Copy, Clone, Debug, Default)]
pub struct PresenceToggle {
    pub strategy: PresenceStrategy,
}

impl PresenceToggle {
    pub fn new(strategy: PresenceStrategy) -> Self {
        Self { strategy }
    }

    pub fn sync(&self, activated: bool, volume: &mut Volume) -> ToggleStep {
        if self.strategy == PresenceStrategy::ShrinkRestore && volume.enabled && !activated {
            if volume.is_collapsed() {
                volume.restore();
                volume.enabled = false;
                return ToggleStep::Restored;
            }
            volume.collapse();
            return ToggleStep::Collapsed;
        }
        let restored = volume.restore();
        volume.enabled = activated;
        if restored { ToggleStep::Restored } else { ToggleStep::Steady }
    }
}
