//! Stack Entry Lifecycle
//!
//! One screen's slot in the navigation stack: its identity, its one-shot
//! mount-ready signal, and the enter/leave animation protocol. The stack
//! sequences entries; each entry drives its own handle through a single
//! transition at a time.
//!
//! The ready signal is a genuine one-shot: [`StackEntry::finish_setup`]
//! resolves it exactly once, and every clone of the [`ReadyFuture`]
//! observes the same completion.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::descriptor::{ScreenDescriptor, ScreenParams, ScreenType};
use crate::host::{wait_for_paints, FrameScheduler, RenderHandle};
use crate::transition::{AnimationState, TransitionName, TransitionOptions};

/// Future for an entry's mount-ready signal
///
/// Cloneable; every clone resolves once the render host completes setup.
pub type ReadyFuture = Shared<BoxFuture<'static, ()>>;

/// One screen's slot in the navigation stack
pub struct StackEntry {
    /// Identity of the screen this slot mounts
    descriptor: ScreenDescriptor,
    /// Paint-boundary source shared with the owning stack
    scheduler: Arc<dyn FrameScheduler>,
    /// Paints to wait out before starting a transition
    warmup_paints: usize,
    /// Shared view of the one-shot ready signal
    ready: ReadyFuture,
    /// Resolver side of the ready signal; taken on first `finish_setup`
    setup_tx: Mutex<Option<oneshot::Sender<()>>>,
    /// Installed by the render host when mounting completes
    handle: Mutex<Option<Arc<dyn RenderHandle>>>,
    /// Opaque component instance, installed alongside the handle
    instance: Mutex<Option<Arc<dyn Any + Send + Sync>>>,
    /// Where this entry is in its animation lifecycle
    state: Mutex<AnimationState>,
}

impl StackEntry {
    /// Create an unmounted entry
    ///
    /// Entries are created by [`crate::NavigationStack::push`] and
    /// [`crate::NavigationStack::create_entry`]; constructing one directly
    /// is only useful for custom hosts and tests.
    #[must_use]
    pub fn new(
        descriptor: ScreenDescriptor,
        scheduler: Arc<dyn FrameScheduler>,
        warmup_paints: usize,
    ) -> Self {
        let (setup_tx, setup_rx) = oneshot::channel();
        // A dropped sender resolves the signal too: an entry discarded
        // before mounting must not hang whoever is still awaiting it.
        let ready = setup_rx.map(|_| ()).boxed().shared();

        Self {
            descriptor,
            scheduler,
            warmup_paints,
            ready,
            setup_tx: Mutex::new(Some(setup_tx)),
            handle: Mutex::new(None),
            instance: Mutex::new(None),
            state: Mutex::new(AnimationState::Idle),
        }
    }

    /// Identity of the screen this slot mounts
    #[must_use]
    pub fn descriptor(&self) -> &ScreenDescriptor {
        &self.descriptor
    }

    /// The screen type
    #[must_use]
    pub fn screen_type(&self) -> &ScreenType {
        &self.descriptor.screen_type
    }

    /// The construction parameters
    #[must_use]
    pub fn params(&self) -> &ScreenParams {
        &self.descriptor.params
    }

    /// The one-shot ready signal
    ///
    /// Resolves once the render host completes this entry's setup. Await it
    /// before driving animations.
    #[must_use]
    pub fn ready(&self) -> ReadyFuture {
        self.ready.clone()
    }

    /// Complete setup: install the render handle and component instance,
    /// and resolve the ready signal
    ///
    /// Called by the render host exactly once when mounting completes;
    /// further calls have no effect.
    pub fn finish_setup(
        &self,
        handle: Arc<dyn RenderHandle>,
        instance: Arc<dyn Any + Send + Sync>,
    ) {
        let Some(setup_tx) = self.setup_tx.lock().take() else {
            tracing::warn!(screen = %self.screen_type(), "finish_setup called twice; ignoring");
            return;
        };
        *self.handle.lock() = Some(handle);
        *self.instance.lock() = Some(instance);
        // Send can only fail if every ready clone was dropped; nothing to do.
        let _ = setup_tx.send(());
    }

    /// Whether the render host has completed setup
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.handle.lock().is_some()
    }

    /// The render handle, once mounted
    #[must_use]
    pub fn render_handle(&self) -> Option<Arc<dyn RenderHandle>> {
        self.handle.lock().clone()
    }

    /// The opaque component instance, once mounted
    #[must_use]
    pub fn instance(&self) -> Option<Arc<dyn Any + Send + Sync>> {
        self.instance.lock().clone()
    }

    /// Where this entry is in its animation lifecycle
    #[must_use]
    pub fn animation_state(&self) -> AnimationState {
        *self.state.lock()
    }

    /// Animate in, forward direction
    pub async fn enter(&self, opts: TransitionOptions) {
        self.animate(true, pick_name(true, false, opts)).await;
    }

    /// Animate in, backward direction (the exposed top during a pop)
    pub async fn enter_reverse(&self, opts: TransitionOptions) {
        self.animate(true, pick_name(true, true, opts)).await;
    }

    /// Animate out, forward direction
    pub async fn leave(&self, opts: TransitionOptions) {
        self.animate(false, pick_name(false, false, opts)).await;
    }

    /// Animate out, backward direction (the predecessor during a push)
    pub async fn leave_reverse(&self, opts: TransitionOptions) {
        self.animate(false, pick_name(false, true, opts)).await;
    }

    /// Shared transition protocol behind the four directional methods
    ///
    /// With a marker name: install marker and shown flag, wait out the
    /// warm-up paints, trigger the start marker, wait for the host to
    /// report the transition finished, clear the marker. Without one
    /// (silent mode): apply the flags and settle immediately.
    async fn animate(&self, shown: bool, name: Option<TransitionName>) {
        let Some(handle) = self.render_handle() else {
            // Never mounted (e.g. restored state discarded before the host
            // got to it): nothing to drive, settle silently.
            *self.state.lock() = settled(shown);
            return;
        };

        handle.set_animation_marker(name);
        handle.set_shown(shown);

        let Some(name) = name else {
            *self.state.lock() = settled(shown);
            return;
        };

        *self.state.lock() = AnimationState::WarmingUp;
        tracing::trace!(screen = %self.screen_type(), transition = %name, "warming up");
        wait_for_paints(self.scheduler.as_ref(), self.warmup_paints).await;

        *self.state.lock() = AnimationState::Animating;
        handle.begin_transition();
        handle.transition_finished().await;

        handle.set_animation_marker(None);
        *self.state.lock() = settled(shown);
        tracing::trace!(screen = %self.screen_type(), transition = %name, "settled");
    }
}

impl fmt::Debug for StackEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackEntry")
            .field("descriptor", &self.descriptor)
            .field("state", &self.animation_state())
            .field("mounted", &self.is_mounted())
            .finish_non_exhaustive()
    }
}

fn pick_name(entering: bool, reverse: bool, opts: TransitionOptions) -> Option<TransitionName> {
    if opts.mode.is_none() {
        None
    } else {
        Some(TransitionName::pick(entering, reverse))
    }
}

fn settled(shown: bool) -> AnimationState {
    if shown {
        AnimationState::SettledShown
    } else {
        AnimationState::SettledHidden
    }
}
