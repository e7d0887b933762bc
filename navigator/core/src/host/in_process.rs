//! In-Process Render Host
//!
//! Host implementation for embedded and headless operation: paints are
//! delivered on task yields, and transitions finish either automatically
//! or when the embedder says so. No process separation, no real frames.
//!
//! Tests lean on the manual mode to freeze an entry mid-transition and
//! assert what the stack looks like while a screen is still animating out.
//!
//! # Usage
//!
//! ```ignore
//! let host = InProcessHost::new();
//! let stack = NavigationStack::new(host.clone());
//!
//! let transition = stack.push(ScreenType::new("home"), ScreenParams::new(), opts)?;
//! host.mount(&stack.last().expect("just pushed"));
//! transition.await;
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::entry::StackEntry;
use crate::toolbar::{ToolbarId, ToolbarSlot};
use crate::transition::TransitionName;

use super::{FrameScheduler, RenderHandle};

/// A call recorded by an [`InProcessHandle`], in arrival order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostCall {
    /// `set_animation_marker` with the given marker
    Marker(Option<TransitionName>),
    /// `set_shown` with the given flag
    Shown(bool),
    /// `begin_transition`
    TransitionStart,
}

/// In-process render host
///
/// Acts as the frame scheduler for a whole stack and hands out one
/// [`InProcessHandle`] per mounted entry.
pub struct InProcessHost {
    /// Whether handles resolve `transition_finished` on their own
    auto_finish: bool,
    /// Paints delivered so far
    paint_count: AtomicU64,
}

impl InProcessHost {
    /// Create a host whose transitions finish automatically
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            auto_finish: true,
            paint_count: AtomicU64::new(0),
        })
    }

    /// Create a host whose transitions finish only when
    /// [`InProcessHandle::finish_transition`] is called
    #[must_use]
    pub fn with_manual_transitions() -> Arc<Self> {
        Arc::new(Self {
            auto_finish: false,
            paint_count: AtomicU64::new(0),
        })
    }

    /// Paints delivered so far
    #[must_use]
    pub fn paint_count(&self) -> u64 {
        self.paint_count.load(Ordering::SeqCst)
    }

    /// Mount an entry: create a handle and complete the entry's setup with
    /// a unit component instance
    pub fn mount(&self, entry: &Arc<StackEntry>) -> Arc<InProcessHandle> {
        self.mount_with_instance(entry, Arc::new(()))
    }

    /// Mount an entry with an explicit component instance
    pub fn mount_with_instance(
        &self,
        entry: &Arc<StackEntry>,
        instance: Arc<dyn Any + Send + Sync>,
    ) -> Arc<InProcessHandle> {
        let handle = Arc::new(InProcessHandle {
            auto_finish: self.auto_finish,
            marker: Mutex::new(None),
            shown: Mutex::new(false),
            calls: Mutex::new(Vec::new()),
            toolbars: Mutex::new(HashMap::new()),
            finished: Notify::new(),
        });
        entry.finish_setup(Arc::clone(&handle) as Arc<dyn RenderHandle>, instance);
        handle
    }
}

#[async_trait]
impl FrameScheduler for InProcessHost {
    async fn next_paint(&self) {
        self.paint_count.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
    }
}

/// Per-screen handle handed out by [`InProcessHost::mount`]
///
/// Records every call it receives so tests can assert protocol ordering.
pub struct InProcessHandle {
    auto_finish: bool,
    marker: Mutex<Option<TransitionName>>,
    shown: Mutex<bool>,
    calls: Mutex<Vec<HostCall>>,
    toolbars: Mutex<HashMap<ToolbarSlot, Vec<ToolbarId>>>,
    finished: Notify,
}

impl InProcessHandle {
    /// Current animation marker
    #[must_use]
    pub fn marker(&self) -> Option<TransitionName> {
        *self.marker.lock()
    }

    /// Current shown/hidden flag
    #[must_use]
    pub fn is_shown(&self) -> bool {
        *self.shown.lock()
    }

    /// Every call received so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().clone()
    }

    /// Record toolbars for a layout slot
    pub fn set_toolbars(&self, slot: ToolbarSlot, ids: Vec<ToolbarId>) {
        self.toolbars.lock().insert(slot, ids);
    }

    /// Let a pending (or imminent) `transition_finished` wait resolve
    ///
    /// Only meaningful on hosts created with
    /// [`InProcessHost::with_manual_transitions`]. The permit is stored, so
    /// calling this before the entry reaches its wait does not race.
    pub fn finish_transition(&self) {
        self.finished.notify_one();
    }
}

#[async_trait]
impl RenderHandle for InProcessHandle {
    fn set_animation_marker(&self, marker: Option<TransitionName>) {
        *self.marker.lock() = marker;
        self.calls.lock().push(HostCall::Marker(marker));
    }

    fn set_shown(&self, shown: bool) {
        *self.shown.lock() = shown;
        self.calls.lock().push(HostCall::Shown(shown));
    }

    fn begin_transition(&self) {
        self.calls.lock().push(HostCall::TransitionStart);
    }

    async fn transition_finished(&self) {
        if self.auto_finish {
            tokio::task::yield_now().await;
        } else {
            self.finished.notified().await;
        }
    }

    fn toolbars(&self, slot: ToolbarSlot) -> Vec<ToolbarId> {
        self.toolbars.lock().get(&slot).cloned().unwrap_or_default()
    }
}
