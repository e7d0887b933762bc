//! Transition Vocabulary
//!
//! The modes a boundary transition can play in, the directional marker
//! names installed on render handles, and the per-entry animation state.
//! The render host interprets the marker names; the core only sequences
//! them.

use serde::{Deserialize, Serialize};

/// How a stack operation's boundary transition is played
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionMode {
    /// Play the full animated protocol
    #[default]
    Animated,
    /// Silent transition: the visual state changes immediately
    None,
}

impl TransitionMode {
    /// Whether this mode skips the animation protocol
    #[must_use]
    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

/// Options for a push/pop/pop-to operation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionOptions {
    /// Animation mode override for the boundary transition
    pub mode: TransitionMode,
}

impl TransitionOptions {
    /// Options for a normal animated transition
    #[must_use]
    pub fn animated() -> Self {
        Self {
            mode: TransitionMode::Animated,
        }
    }

    /// Options for a silent transition
    #[must_use]
    pub fn none() -> Self {
        Self {
            mode: TransitionMode::None,
        }
    }
}

/// Directional transition marker installed on a render handle
///
/// Reverse variants play the history-unwind direction: the predecessor
/// during a push, the newly exposed top during a pop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionName {
    /// Screen animates in, forward direction
    Enter,
    /// Screen animates in, backward direction
    EnterReverse,
    /// Screen animates out, forward direction
    Leave,
    /// Screen animates out, backward direction
    LeaveReverse,
}

impl TransitionName {
    /// Select the marker for a direction
    #[must_use]
    pub fn pick(entering: bool, reverse: bool) -> Self {
        match (entering, reverse) {
            (true, false) => Self::Enter,
            (true, true) => Self::EnterReverse,
            (false, false) => Self::Leave,
            (false, true) => Self::LeaveReverse,
        }
    }

    /// The marker value as the render host sees it
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enter => "enter",
            Self::EnterReverse => "enter-reverse",
            Self::Leave => "leave",
            Self::LeaveReverse => "leave-reverse",
        }
    }

    /// Whether this marker plays in the backward direction
    #[must_use]
    pub fn is_reverse(self) -> bool {
        matches!(self, Self::EnterReverse | Self::LeaveReverse)
    }
}

impl std::fmt::Display for TransitionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Animation lifecycle state of a stack entry
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimationState {
    /// No transition has run yet
    #[default]
    Idle,
    /// Marker installed, waiting out the warm-up paints
    WarmingUp,
    /// Transition started, waiting for the host to report it finished
    Animating,
    /// Terminal: visible, no transition pending
    SettledShown,
    /// Terminal: hidden, no transition pending
    SettledHidden,
}

impl AnimationState {
    /// Whether the entry has reached a terminal visual state
    #[must_use]
    pub fn is_settled(self) -> bool {
        matches!(self, Self::SettledShown | Self::SettledHidden)
    }
}
