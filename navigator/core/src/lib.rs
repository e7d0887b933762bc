//! Navigator Core - Headless Screen-Navigation Stack
//!
//! This crate provides the navigation-stack controller that backs a UI
//! framework's "tabs" and "nav" containers, completely independent of any
//! rendering surface. It can drive a DOM-like host, a TUI, a native view
//! hierarchy, or run headless for testing and automation.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Owning Container (tabs/nav)                │
//! │        push / pop / pop_to / remove / set_stack / last        │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┼───────────────────────────────┐
//! │                      NAVIGATOR CORE                           │
//! │  ┌───────────────────────────┴─────────────────────────────┐ │
//! │  │                    NavigationStack                       │ │
//! │  │   logical history (sync)  ·  render list (async-torn)   │ │
//! │  │  ┌────────────┐  ┌────────────┐  ┌────────────┐         │ │
//! │  │  │ StackEntry │  │ StackEntry │  │ StackEntry │  ...    │ │
//! │  │  └─────┬──────┘  └─────┬──────┘  └─────┬──────┘         │ │
//! │  └────────┼───────────────┼───────────────┼────────────────┘ │
//! └───────────┼───────────────┼───────────────┼──────────────────┘
//!             │ markers, shown flag, start    │
//!             │ paints, transition-finished   │
//! ┌───────────┴───────────────┴───────────────┴──────────────────┐
//! │                Render Host (FrameScheduler / RenderHandle)    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`NavigationStack`]: ordered screen history plus transition sequencing
//! - [`StackEntry`]: one screen's slot — identity, ready signal, animation
//!   protocol
//! - [`FrameScheduler`] / [`RenderHandle`]: the host boundary
//! - [`InProcessHost`]: host implementation for embedding and tests
//! - [`ScreenDescriptor`]: persisted screen identity for state restoration
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use navigator_core::{
//!     InProcessHost, NavigationStack, ScreenParams, ScreenType,
//!     TransitionOptions,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let host = InProcessHost::new();
//!     let stack = NavigationStack::new(host.clone());
//!
//!     stack.set_initial(ScreenType::new("home")).await;
//!
//!     let transition = stack
//!         .push(
//!             ScreenType::new("detail"),
//!             ScreenParams::new(),
//!             TransitionOptions::animated(),
//!         )
//!         .expect("no transition in flight");
//!     host.mount(&stack.last().expect("just pushed"));
//!     transition.await;
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`stack`]: the navigation stack controller and its errors
//! - [`entry`]: per-screen slot lifecycle and animation protocol
//! - [`descriptor`]: screen identity and construction parameters
//! - [`transition`]: transition modes, marker names, animation states
//! - [`host`]: render-host traits and the in-process implementation
//! - [`toolbar`]: toolbar slot/identity relay types
//! - [`config`]: stack-wide tuning
//!
//! # No Render Dependencies
//!
//! This crate has **zero** dependencies on any rendering or widget
//! framework. Hosts adapt it to their surface by implementing two traits.
//!
//! # Logical vs Render State
//!
//! The one rule that makes the rest fall into place: the logical history
//! mutates synchronously at every call site, while render-side teardown
//! happens only after leave transitions finish. A screen can be logically
//! gone and visually mid-flight at the same time, and both views answer
//! honestly.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod descriptor;
pub mod entry;
pub mod host;
pub mod stack;
pub mod toolbar;
pub mod transition;

// Re-exports for convenience
pub use config::NavConfig;
pub use descriptor::{ScreenDescriptor, ScreenParams, ScreenType};
pub use entry::{ReadyFuture, StackEntry};
pub use host::{
    wait_for_paints, FrameScheduler, HostCall, InProcessHandle, InProcessHost, RenderHandle,
    DEFAULT_WARMUP_PAINTS,
};
pub use stack::{NavError, NavigationStack, TransitionFuture};
pub use toolbar::{ToolbarId, ToolbarSlot};
pub use transition::{AnimationState, TransitionMode, TransitionName, TransitionOptions};
