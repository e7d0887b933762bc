//! Navigation Stack
//!
//! The ordered history of logical screens, the slightly longer-lived
//! render list, and the operation surface the owning container (tabs or
//! nav) drives.
//!
//! # Design Philosophy
//!
//! Two sequences share the same entries. The logical stack is the sane
//! one: it is mutated synchronously at every call site, so `last()` and
//! `len()` answer for the most recent operation even while screens are
//! still animating. The render list is what the host still has mounted —
//! an entry only leaves it after its leave transition finishes (or when
//! it is destroyed silently). The render list is always a superset of the
//! logical stack.
//!
//! Every operation splits the same way: mutate the logical stack in the
//! method body, return a future that plays the boundary transition and
//! tears down the render list. Consecutive operations are serialized by
//! an in-flight guard; overlapping a second push/pop onto an unresolved
//! one is a contract violation and fails fast with
//! [`NavError::TransitionInFlight`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::future::{self, BoxFuture};
use parking_lot::Mutex;
use thiserror::Error;

use crate::config::NavConfig;
use crate::descriptor::{ScreenDescriptor, ScreenParams, ScreenType};
use crate::entry::StackEntry;
use crate::host::FrameScheduler;
use crate::toolbar::{ToolbarId, ToolbarSlot};
use crate::transition::TransitionOptions;

/// Future resolving when an operation's boundary transition completes
///
/// The synchronous side effects of the operation have already happened by
/// the time the future is returned. Dropping it without awaiting cancels
/// the animation phase (render-list teardown included) but never undoes
/// the logical mutation. Must be awaited on a tokio runtime.
pub type TransitionFuture = BoxFuture<'static, ()>;

/// Errors surfaced by stack operations
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NavError {
    /// A push/pop/pop-to was issued while a previous operation's
    /// transition had not yet resolved
    #[error("a navigation transition is already in flight")]
    TransitionInFlight,
    /// An index-addressed operation named a position the stack does not have
    #[error("index {index} is out of range for a stack of depth {depth}")]
    IndexOutOfRange {
        /// The requested position
        index: usize,
        /// Stack depth at the time of the call
        depth: usize,
    },
}

/// Releases the in-flight flag when the owning transition future
/// completes or is dropped.
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The navigation stack controller
///
/// Owns both sequences exclusively; entries are shared between them by
/// reference, never duplicated.
pub struct NavigationStack {
    /// Caller-visible history; back = current. Mutated synchronously only.
    logical: Mutex<Vec<Arc<StackEntry>>>,
    /// Entries still mounted in the render host; superset of `logical`.
    /// Shared with operation futures, which remove entries after leave
    /// transitions complete.
    render: Arc<Mutex<Vec<Arc<StackEntry>>>>,
    /// Paint-boundary source handed to every entry
    scheduler: Arc<dyn FrameScheduler>,
    /// Stack-wide tuning
    config: NavConfig,
    /// Guards `set_initial` against repeat calls
    initialized: AtomicBool,
    /// Set while an operation's transition future is unresolved
    in_flight: Arc<AtomicBool>,
}

impl NavigationStack {
    /// Create a stack with default configuration
    #[must_use]
    pub fn new(scheduler: Arc<dyn FrameScheduler>) -> Self {
        Self::with_config(scheduler, NavConfig::default())
    }

    /// Create a stack with explicit configuration
    #[must_use]
    pub fn with_config(scheduler: Arc<dyn FrameScheduler>, config: NavConfig) -> Self {
        Self {
            logical: Mutex::new(Vec::new()),
            render: Arc::new(Mutex::new(Vec::new())),
            scheduler,
            config,
            initialized: AtomicBool::new(false),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create an unmounted entry wired to this stack's scheduler and
    /// configuration
    ///
    /// For [`Self::set_stack`] callers reconstructing persisted state.
    #[must_use]
    pub fn create_entry(&self, descriptor: ScreenDescriptor) -> Arc<StackEntry> {
        Arc::new(StackEntry::new(
            descriptor,
            Arc::clone(&self.scheduler),
            self.config.warmup_paints,
        ))
    }

    /// One-time initializer: a silent push of the first screen
    ///
    /// No-op (immediately-ready future) when already initialized.
    pub fn set_initial(&self, screen: ScreenType) -> TransitionFuture {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return Box::pin(future::ready(()));
        }
        match self.push(screen, ScreenParams::new(), TransitionOptions::none()) {
            Ok(transition) => transition,
            Err(error) => {
                tracing::warn!(%error, "set_initial could not push; ignoring");
                Box::pin(future::ready(()))
            }
        }
    }

    /// Push a new screen onto the history
    ///
    /// The entry joins both sequences before this returns, so `last()` and
    /// `len()` reflect it immediately. The returned future waits for the
    /// host to mount the entry, plays the predecessor's reverse-leave
    /// detached, and resolves once the new entry's enter transition
    /// completes.
    pub fn push(
        &self,
        screen: ScreenType,
        params: ScreenParams,
        opts: TransitionOptions,
    ) -> Result<TransitionFuture, NavError> {
        let guard = self.begin_operation()?;
        let entry = self.create_entry(ScreenDescriptor::with_params(screen, params));

        // The predecessor is captured here, before the ready-signal
        // suspension; the logical stack must not be re-derived after an
        // await.
        let previous = {
            let mut logical = self.logical.lock();
            let previous = logical.last().cloned();
            logical.push(Arc::clone(&entry));
            previous
        };
        self.render.lock().push(Arc::clone(&entry));

        let opts = self.effective_options(opts);
        tracing::debug!(screen = %entry.screen_type(), depth = self.len(), "pushed screen");

        Ok(Box::pin(async move {
            let _guard = guard;
            entry.ready().await;
            if let Some(previous) = previous {
                tokio::spawn(async move { previous.leave_reverse(opts).await });
            }
            entry.enter(opts).await;
        }))
    }

    /// Pop the current screen off the history
    ///
    /// The logical top is removed before this returns. The returned future
    /// plays the exposed top's reverse-enter detached, waits out the
    /// removed entry's leave transition, then drops it from the render
    /// list. On an empty stack it resolves immediately with no side
    /// effect.
    pub fn pop(&self, opts: TransitionOptions) -> Result<TransitionFuture, NavError> {
        if self.logical.lock().is_empty() {
            return Ok(Box::pin(future::ready(())));
        }
        let guard = self.begin_operation()?;
        Ok(self.pop_boundary(opts, guard))
    }

    /// Pop every screen above `index` with a single boundary transition
    ///
    /// Screens strictly between the current top and the target are
    /// destroyed silently — no animate calls, immediate removal from the
    /// render list. Only the original top animates out. No-op when the
    /// stack is already at or below the target depth.
    pub fn pop_to(
        &self,
        index: usize,
        opts: TransitionOptions,
    ) -> Result<TransitionFuture, NavError> {
        if self.len() <= index + 1 {
            return Ok(Box::pin(future::ready(())));
        }
        let guard = self.begin_operation()?;

        // Hold the top aside, silently drop everything else above the
        // target, put the top back, then run the normal pop machinery.
        let discarded = {
            let mut logical = self.logical.lock();
            let current = logical.pop();
            let mut discarded = Vec::new();
            while logical.len() > index + 1 {
                if let Some(entry) = logical.pop() {
                    discarded.push(entry);
                }
            }
            if let Some(current) = current {
                logical.push(current);
            }
            discarded
        };
        {
            let mut render = self.render.lock();
            for entry in &discarded {
                render.retain(|mounted| !Arc::ptr_eq(mounted, entry));
            }
        }
        tracing::debug!(index, discarded = discarded.len(), "popping to index");

        Ok(self.pop_boundary(opts, guard))
    }

    /// Synchronously drain and destroy every entry, with no animation
    pub fn pop_all(&self) {
        let drained = std::mem::take(&mut *self.logical.lock());
        let mut render = self.render.lock();
        for entry in &drained {
            render.retain(|mounted| !Arc::ptr_eq(mounted, entry));
        }
        tracing::debug!(drained = drained.len(), "popped all screens");
    }

    /// Replace both sequences wholesale with a copy of the given order
    ///
    /// No animation plays and nothing is destroyed; entries previously in
    /// the stack are simply forgotten. Used for state restoration.
    pub fn set_stack(&self, entries: &[Arc<StackEntry>]) {
        *self.logical.lock() = entries.to_vec();
        *self.render.lock() = entries.to_vec();
    }

    /// Excise and destroy the entry at a logical position, with no
    /// animation
    ///
    /// Unlike pop, the entry is gone from both sequences when this
    /// returns.
    pub fn remove(&self, index: usize) -> Result<(), NavError> {
        let entry = {
            let mut logical = self.logical.lock();
            if index >= logical.len() {
                return Err(NavError::IndexOutOfRange {
                    index,
                    depth: logical.len(),
                });
            }
            logical.remove(index)
        };
        self.render
            .lock()
            .retain(|mounted| !Arc::ptr_eq(mounted, &entry));
        tracing::debug!(screen = %entry.screen_type(), index, "removed screen");
        Ok(())
    }

    /// The current top of the logical stack
    #[must_use]
    pub fn last(&self) -> Option<Arc<StackEntry>> {
        self.logical.lock().last().cloned()
    }

    /// Depth of the logical stack
    #[must_use]
    pub fn len(&self) -> usize {
        self.logical.lock().len()
    }

    /// Whether the logical stack is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.logical.lock().is_empty()
    }

    /// Whether any entry in the logical stack has the given screen type
    ///
    /// Entries mid-leave — present only in the render list — do not count.
    #[must_use]
    pub fn contains_screen(&self, screen: &ScreenType) -> bool {
        self.logical
            .lock()
            .iter()
            .any(|entry| entry.screen_type() == screen)
    }

    /// The current top's recorded toolbars for a layout slot
    ///
    /// Empty when the stack is empty or the top is not yet mounted.
    #[must_use]
    pub fn toolbars(&self, slot: ToolbarSlot) -> Vec<ToolbarId> {
        self.last()
            .and_then(|entry| entry.render_handle())
            .map(|handle| handle.toolbars(slot))
            .unwrap_or_default()
    }

    /// Snapshot of the logical stack
    #[must_use]
    pub fn entries(&self) -> Vec<Arc<StackEntry>> {
        self.logical.lock().clone()
    }

    /// Snapshot of the render list
    #[must_use]
    pub fn render_entries(&self) -> Vec<Arc<StackEntry>> {
        self.render.lock().clone()
    }

    /// Descriptors of the logical stack, oldest first
    ///
    /// Sufficient to reconstruct the same logical stack via
    /// [`Self::restore`].
    #[must_use]
    pub fn snapshot(&self) -> Vec<ScreenDescriptor> {
        self.logical
            .lock()
            .iter()
            .map(|entry| entry.descriptor().clone())
            .collect()
    }

    /// Rebuild both sequences from persisted descriptors
    ///
    /// The created entries are unmounted until the host gets to them; they
    /// are returned so the container can hand them over for mounting.
    pub fn restore(
        &self,
        descriptors: impl IntoIterator<Item = ScreenDescriptor>,
    ) -> Vec<Arc<StackEntry>> {
        let entries: Vec<Arc<StackEntry>> = descriptors
            .into_iter()
            .map(|descriptor| self.create_entry(descriptor))
            .collect();
        self.set_stack(&entries);
        tracing::debug!(depth = entries.len(), "restored stack");
        entries
    }

    /// The shared back half of pop and pop-to
    fn pop_boundary(&self, opts: TransitionOptions, guard: InFlightGuard) -> TransitionFuture {
        let (current, destination) = {
            let mut logical = self.logical.lock();
            let current = logical.pop();
            let destination = logical.last().cloned();
            (current, destination)
        };
        let render = Arc::clone(&self.render);
        let opts = self.effective_options(opts);
        if let Some(current) = &current {
            tracing::debug!(screen = %current.screen_type(), depth = self.len(), "popped screen");
        }

        Box::pin(async move {
            let _guard = guard;
            let Some(current) = current else {
                return;
            };
            if let Some(destination) = destination {
                tokio::spawn(async move { destination.enter_reverse(opts).await });
            }
            current.leave(opts).await;
            render
                .lock()
                .retain(|mounted| !Arc::ptr_eq(mounted, &current));
        })
    }

    fn begin_operation(&self) -> Result<InFlightGuard, NavError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("rejected navigation operation: transition in flight");
            return Err(NavError::TransitionInFlight);
        }
        Ok(InFlightGuard(Arc::clone(&self.in_flight)))
    }

    fn effective_options(&self, opts: TransitionOptions) -> TransitionOptions {
        if self.config.transitions_enabled {
            opts
        } else {
            TransitionOptions::none()
        }
    }
}
