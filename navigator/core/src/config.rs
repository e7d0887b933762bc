//! Navigation Configuration
//!
//! Per-stack tuning knobs. Containers usually run with the defaults;
//! headless embedders and tests disable transitions wholesale instead of
//! threading a silent mode through every call site.

use serde::{Deserialize, Serialize};

use crate::host::DEFAULT_WARMUP_PAINTS;

/// Configuration for a navigation stack
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavConfig {
    /// Whether boundary transitions animate at all
    ///
    /// When false, every operation plays in silent mode regardless of the
    /// options passed to it.
    pub transitions_enabled: bool,
    /// Paint notifications to wait out before starting a transition
    pub warmup_paints: usize,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            transitions_enabled: true,
            warmup_paints: DEFAULT_WARMUP_PAINTS,
        }
    }
}

impl NavConfig {
    /// Default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable boundary transitions entirely
    #[must_use]
    pub fn without_transitions(mut self) -> Self {
        self.transitions_enabled = false;
        self
    }

    /// Override the warm-up paint count
    #[must_use]
    pub fn with_warmup_paints(mut self, paints: usize) -> Self {
        self.warmup_paints = paints;
        self
    }
}
