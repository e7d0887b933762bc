//! Toolbar Slot Types
//!
//! A screen can record toolbars into named layout slots; the owning
//! container reads the current top screen's set when laying out chrome.
//! The core only relays identities — layout is the container's job.

use serde::{Deserialize, Serialize};

/// Layout slot a toolbar occupies within a screen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolbarSlot {
    /// Above the screen content
    Top,
    /// Below the screen content
    Bottom,
}

impl ToolbarSlot {
    /// Slot name as the container addresses it
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl std::fmt::Display for ToolbarSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Opaque identity of a toolbar recorded by the render host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolbarId(pub u64);

impl ToolbarId {
    /// Create a toolbar ID
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ToolbarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
