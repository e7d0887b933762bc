//! Screen Identity Types
//!
//! The identity of a logical screen: its type plus its construction
//! parameters. Both are opaque to the navigation stack — it never
//! instantiates a screen itself. They exist for identity checks
//! ("is a settings screen already in the history?") and for state
//! snapshots, which must survive serialization.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Screen type identifier
///
/// Names the visual component a stack entry will mount. Identity checks
/// such as [`crate::NavigationStack::contains_screen`] compare this value
/// only, never the parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenType(pub String);

impl ScreenType {
    /// Create a screen type from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ScreenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Construction parameters handed to the screen when it is instantiated
///
/// The stack carries these verbatim; only the instantiation host reads them.
pub type ScreenParams = HashMap<String, serde_json::Value>;

/// Identity of one logical screen: type plus construction parameters
///
/// An ordered sequence of descriptors is sufficient to reconstruct a
/// logical stack, which is what state restoration persists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenDescriptor {
    /// The screen type to mount
    pub screen_type: ScreenType,
    /// Construction parameters (opaque to the stack)
    #[serde(default)]
    pub params: ScreenParams,
}

impl ScreenDescriptor {
    /// Create a descriptor with no parameters
    #[must_use]
    pub fn new(screen_type: ScreenType) -> Self {
        Self {
            screen_type,
            params: ScreenParams::new(),
        }
    }

    /// Create a descriptor with parameters
    #[must_use]
    pub fn with_params(screen_type: ScreenType, params: ScreenParams) -> Self {
        Self {
            screen_type,
            params,
        }
    }

    /// Add a single parameter
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }
}
