//! Render Host Boundary
//!
//! Traits the navigation core uses to talk to whatever actually mounts
//! and animates screens. The core never touches a node, attribute, or
//! class itself: it installs markers and flags through a [`RenderHandle`]
//! and suspends on the host's paint and transition-finished notifications.
//!
//! # Design Philosophy
//!
//! - The core owns sequencing; the host owns pixels and timing.
//! - A host that never reports back stalls the operation future. That is
//!   a contract violation on the host's side, not a runtime error — there
//!   are no timeouts here.
//! - The warm-up wait is an isolated, parameterized utility rather than
//!   inlined magic, so the constraint it works around stays visible.

pub mod in_process;

pub use in_process::{HostCall, InProcessHandle, InProcessHost};

use async_trait::async_trait;

use crate::toolbar::{ToolbarId, ToolbarSlot};
use crate::transition::TransitionName;

/// Default number of paint notifications to wait out before starting a
/// transition
///
/// A transition whose state is applied on the same paint that installed it
/// may never visually run; two paints guarantee the state is committed
/// before the start marker lands.
pub const DEFAULT_WARMUP_PAINTS: usize = 2;

/// Paint-boundary notification source
///
/// One per host; shared by every entry of a stack.
#[async_trait]
pub trait FrameScheduler: Send + Sync {
    /// Resolves at the next paint boundary.
    async fn next_paint(&self);
}

/// Per-screen handle the render host installs via
/// [`crate::StackEntry::finish_setup`]
///
/// The marker/flag setters are synchronous and idempotent; the host applies
/// them to its native representation (attributes, classes, style props).
#[async_trait]
pub trait RenderHandle: Send + Sync {
    /// Install or clear the pending-transition marker.
    fn set_animation_marker(&self, marker: Option<TransitionName>);

    /// Apply the durable shown/hidden flag, independent of any transition.
    fn set_shown(&self, shown: bool);

    /// Trigger the transition start marker.
    fn begin_transition(&self);

    /// Resolves when the host reports this screen's transition finished.
    async fn transition_finished(&self);

    /// Toolbars this screen recorded for a layout slot.
    fn toolbars(&self, slot: ToolbarSlot) -> Vec<ToolbarId> {
        let _ = slot;
        Vec::new()
    }
}

/// Wait out `count` consecutive paint notifications.
pub async fn wait_for_paints(scheduler: &dyn FrameScheduler, count: usize) {
    for _ in 0..count {
        scheduler.next_paint().await;
    }
}
