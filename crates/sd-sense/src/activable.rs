//! Activation flag and activation budget shared by every sense.

/// Whether a component may fire, and how many more times.
///
/// With `infinite == false`, at most `max` activations are accepted until
/// [`reset_activations`](Self::reset_activations) is called.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Activable {
    pub activated: bool,
    pub infinite: bool,
    pub max: u32,
    /// Per-component verbose logging.
    pub debug: bool,
    current: u32,
}

impl Default for Activable {
    fn default() -> Self {
        Self {
            activated: true,
            infinite: true,
            max: 100,
            debug: false,
            current: 0,
        }
    }
}

impl Activable {
    /// An activated component with a finite budget of `max`.
    pub fn limited(max: u32) -> Self {
        Self { infinite: false, max, ..Self::default() }
    }

    /// Budget remaining, ignoring the activation flag.
    #[inline]
    pub fn has_budget(&self) -> bool {
        self.infinite || self.current < self.max
    }

    /// `true` if a delivery would currently be accepted.  No side effect.
    #[inline]
    pub fn can_fire(&self) -> bool {
        self.activated && self.has_budget()
    }

    /// Count one activation if allowed.  Returns `false` with no side effect
    /// when deactivated or out of budget.
    pub fn try_consume(&mut self) -> bool {
        if !self.can_fire() {
            return false;
        }
        self.current = self.current.saturating_add(1);
        true
    }

    /// Zero the activation counter.
    pub fn reset_activations(&mut self) {
        self.current = 0;
    }

    /// Set the activation flag.  Returns `true` if it changed.
    pub fn set_activated(&mut self, activated: bool) -> bool {
        let changed = self.activated != activated;
        self.activated = activated;
        changed
    }

    /// Activations counted since the last reset.
    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }
}
