//! Integration tests for the navigation-stack lifecycle
//!
//! These tests drive the full stack against the in-process host and verify
//! that the logical history and the render list stay consistent while
//! transitions are in flight. Scenarios cover:
//! - Push/pop flows with overlapping screen lifetimes
//! - Batch pops (`pop_to`) discarding intermediate screens silently
//! - State restoration round trips through serde
//! - The render-list ⊇ logical-stack invariant at every observable point

use std::sync::Arc;

use pretty_assertions::assert_eq;

use navigator_core::{
    AnimationState, FrameScheduler, HostCall, InProcessHost, NavigationStack, ScreenDescriptor,
    ScreenParams, ScreenType, ToolbarId, ToolbarSlot, TransitionName, TransitionOptions,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn new_stack(host: &Arc<InProcessHost>) -> NavigationStack {
    NavigationStack::new(Arc::clone(host) as Arc<dyn FrameScheduler>)
}

fn screen(name: &str) -> ScreenType {
    ScreenType::new(name)
}

/// Push a screen, mount it, and wait the transition out.
async fn push_settled(
    nav: &NavigationStack,
    host: &Arc<InProcessHost>,
    name: &str,
    opts: TransitionOptions,
) -> Arc<navigator_core::InProcessHandle> {
    let transition = nav
        .push(screen(name), ScreenParams::new(), opts)
        .expect("no transition in flight");
    let handle = host.mount(&nav.last().expect("just pushed"));
    transition.await;
    handle
}

/// Yield enough times for detached side animations to run to completion
/// on the current-thread test runtime.
async fn settle_tasks() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

fn assert_render_superset(nav: &NavigationStack) {
    let render = nav.render_entries();
    for entry in nav.entries() {
        assert!(
            render.iter().any(|mounted| Arc::ptr_eq(mounted, &entry)),
            "logical entry {:?} missing from render list",
            entry
        );
    }
}

// =============================================================================
// Push / pop flows
// =============================================================================

#[tokio::test]
async fn test_pop_exposes_previous_screen_before_leave_finishes() {
    init_tracing();
    let host = InProcessHost::new();
    let nav = new_stack(&host);

    push_settled(&nav, &host, "a", TransitionOptions::none()).await;
    let handle_b = push_settled(&nav, &host, "b", TransitionOptions::animated()).await;

    let popped = nav.pop(TransitionOptions::animated()).expect("pop");

    // The logical top changed at the call, before the transition ran.
    assert_eq!(nav.len(), 1);
    assert_eq!(nav.last().expect("top").screen_type(), &screen("a"));
    // B is still occupying the render host mid-leave.
    assert_eq!(nav.render_entries().len(), 2);
    assert_render_superset(&nav);

    popped.await;
    settle_tasks().await;

    // Leave finished: B's render presence is gone, its marker cleared.
    assert_eq!(nav.render_entries().len(), 1);
    assert_eq!(handle_b.marker(), None);
    assert!(!handle_b.is_shown());
    assert_render_superset(&nav);
}

#[tokio::test]
async fn test_push_plays_predecessor_reverse_leave_detached() {
    init_tracing();
    let host = InProcessHost::new();
    let nav = new_stack(&host);

    let handle_a = push_settled(&nav, &host, "a", TransitionOptions::none()).await;
    let entry_a = nav.last().expect("top");

    push_settled(&nav, &host, "b", TransitionOptions::animated()).await;
    // The push future resolved with B's enter; A's reverse-leave runs on
    // its own task and settles shortly after.
    settle_tasks().await;

    assert_eq!(entry_a.animation_state(), AnimationState::SettledHidden);
    assert!(!handle_a.is_shown());
    assert!(handle_a
        .calls()
        .contains(&HostCall::Marker(Some(TransitionName::LeaveReverse))));
}

#[tokio::test]
async fn test_pop_reverse_enters_the_exposed_top() {
    init_tracing();
    let host = InProcessHost::new();
    let nav = new_stack(&host);

    let handle_a = push_settled(&nav, &host, "a", TransitionOptions::none()).await;
    let entry_a = nav.last().expect("top");
    push_settled(&nav, &host, "b", TransitionOptions::animated()).await;

    nav.pop(TransitionOptions::animated()).expect("pop").await;
    settle_tasks().await;

    assert_eq!(entry_a.animation_state(), AnimationState::SettledShown);
    assert!(handle_a.is_shown());
    assert!(handle_a
        .calls()
        .contains(&HostCall::Marker(Some(TransitionName::EnterReverse))));
}

// =============================================================================
// Batch pop (pop_to)
// =============================================================================

#[tokio::test]
async fn test_pop_to_discards_intermediates_silently() {
    init_tracing();
    let host = InProcessHost::new();
    let nav = new_stack(&host);

    push_settled(&nav, &host, "a", TransitionOptions::none()).await;
    let handle_b = push_settled(&nav, &host, "b", TransitionOptions::none()).await;
    let handle_c = push_settled(&nav, &host, "c", TransitionOptions::none()).await;
    let handle_d = push_settled(&nav, &host, "d", TransitionOptions::none()).await;

    let calls_b = handle_b.calls();
    let calls_c = handle_c.calls();

    let transition = nav.pop_to(0, TransitionOptions::animated()).expect("pop_to");

    // B and C vanished from both sequences at the call, with no animation.
    assert_eq!(nav.len(), 1);
    assert_eq!(nav.last().expect("top").screen_type(), &screen("a"));
    assert_eq!(nav.render_entries().len(), 2); // A + D mid-leave
    assert_eq!(handle_b.calls(), calls_b);
    assert_eq!(handle_c.calls(), calls_c);

    transition.await;
    settle_tasks().await;

    // Only the boundary animated: D left, A re-entered in reverse.
    assert_eq!(nav.render_entries().len(), 1);
    assert!(handle_d
        .calls()
        .contains(&HostCall::Marker(Some(TransitionName::Leave))));
    assert_eq!(handle_b.calls(), calls_b);
    assert_eq!(handle_c.calls(), calls_c);
    assert_render_superset(&nav);
}

#[tokio::test]
async fn test_pop_to_current_depth_is_a_no_op() {
    init_tracing();
    let host = InProcessHost::new();
    let nav = new_stack(&host);

    push_settled(&nav, &host, "a", TransitionOptions::none()).await;
    push_settled(&nav, &host, "b", TransitionOptions::none()).await;

    // Depth 2, target index 1: already there.
    nav.pop_to(1, TransitionOptions::animated())
        .expect("pop_to")
        .await;

    assert_eq!(nav.len(), 2);
    assert_eq!(nav.render_entries().len(), 2);
    assert_eq!(nav.last().expect("top").screen_type(), &screen("b"));

    // Deeper targets are equally inert.
    nav.pop_to(7, TransitionOptions::animated())
        .expect("pop_to")
        .await;
    assert_eq!(nav.len(), 2);
}

// =============================================================================
// Identity checks and toolbars
// =============================================================================

#[tokio::test]
async fn test_contains_screen_ignores_leaving_entries() {
    init_tracing();
    let host = InProcessHost::new();
    let nav = new_stack(&host);

    push_settled(&nav, &host, "list", TransitionOptions::none()).await;
    push_settled(&nav, &host, "detail", TransitionOptions::animated()).await;

    let popped = nav.pop(TransitionOptions::animated()).expect("pop");

    // "detail" is mid-leave: render list only.
    assert!(nav.contains_screen(&screen("list")));
    assert!(!nav.contains_screen(&screen("detail")));

    popped.await;
    assert!(!nav.contains_screen(&screen("detail")));
}

#[tokio::test]
async fn test_toolbars_come_from_the_current_top() {
    init_tracing();
    let host = InProcessHost::new();
    let nav = new_stack(&host);

    assert!(nav.toolbars(ToolbarSlot::Top).is_empty());

    let handle = push_settled(&nav, &host, "a", TransitionOptions::none()).await;
    handle.set_toolbars(ToolbarSlot::Top, vec![ToolbarId::new(1), ToolbarId::new(2)]);
    handle.set_toolbars(ToolbarSlot::Bottom, vec![ToolbarId::new(3)]);

    assert_eq!(
        nav.toolbars(ToolbarSlot::Top),
        vec![ToolbarId::new(1), ToolbarId::new(2)]
    );
    assert_eq!(nav.toolbars(ToolbarSlot::Bottom), vec![ToolbarId::new(3)]);

    // A pushed-but-unmounted top has no toolbars to report.
    let _pending = nav
        .push(screen("b"), ScreenParams::new(), TransitionOptions::none())
        .expect("push");
    assert!(nav.toolbars(ToolbarSlot::Top).is_empty());
}

// =============================================================================
// Removal and wholesale replacement
// =============================================================================

#[tokio::test]
async fn test_remove_destroys_immediately() {
    init_tracing();
    let host = InProcessHost::new();
    let nav = new_stack(&host);

    push_settled(&nav, &host, "a", TransitionOptions::none()).await;
    push_settled(&nav, &host, "b", TransitionOptions::none()).await;
    push_settled(&nav, &host, "c", TransitionOptions::none()).await;

    nav.remove(1).expect("remove b");

    // Gone from both sequences before any animation could run.
    assert_eq!(nav.len(), 2);
    assert_eq!(nav.render_entries().len(), 2);
    assert!(!nav.contains_screen(&screen("b")));
    assert_eq!(nav.last().expect("top").screen_type(), &screen("c"));
    assert_render_superset(&nav);
}

#[tokio::test]
async fn test_set_stack_replaces_without_side_effects() {
    init_tracing();
    let host = InProcessHost::new();
    let nav = new_stack(&host);

    push_settled(&nav, &host, "old", TransitionOptions::none()).await;

    let replacement: Vec<_> = ["a", "b", "c"]
        .into_iter()
        .map(|name| nav.create_entry(ScreenDescriptor::new(screen(name))))
        .collect();
    let paints_before = host.paint_count();

    nav.set_stack(&replacement);

    assert_eq!(nav.len(), 3);
    for (given, held) in replacement.iter().zip(nav.entries()) {
        assert!(Arc::ptr_eq(given, &held));
    }
    for (given, held) in replacement.iter().zip(nav.render_entries()) {
        assert!(Arc::ptr_eq(given, &held));
    }
    // No animation ran and nobody touched the entries.
    assert_eq!(host.paint_count(), paints_before);
    for entry in nav.entries() {
        assert_eq!(entry.animation_state(), AnimationState::Idle);
        assert!(!entry.is_mounted());
    }
}

// =============================================================================
// State restoration
// =============================================================================

#[tokio::test]
async fn test_snapshot_restore_round_trips_through_serde() {
    init_tracing();
    let host = InProcessHost::new();
    let nav = new_stack(&host);

    let mut params = ScreenParams::new();
    params.insert("item_id".to_string(), serde_json::json!(42));
    let transition = nav
        .push(screen("list"), ScreenParams::new(), TransitionOptions::none())
        .expect("push list");
    host.mount(&nav.last().expect("top"));
    transition.await;
    let transition = nav
        .push(screen("detail"), params, TransitionOptions::none())
        .expect("push detail");
    host.mount(&nav.last().expect("top"));
    transition.await;

    let persisted = serde_json::to_string(&nav.snapshot()).expect("serialize");
    let descriptors: Vec<ScreenDescriptor> =
        serde_json::from_str(&persisted).expect("deserialize");

    let restored = new_stack(&host);
    let entries = restored.restore(descriptors);

    assert_eq!(entries.len(), 2);
    assert_eq!(restored.snapshot(), nav.snapshot());
    assert_eq!(restored.last().expect("top").screen_type(), &screen("detail"));
    assert_eq!(
        restored.last().expect("top").params()["item_id"],
        serde_json::json!(42)
    );
    // Restored entries await their host.
    for entry in restored.entries() {
        assert!(!entry.is_mounted());
    }
    assert_render_superset(&restored);
}

#[tokio::test]
async fn test_restored_entries_can_be_discarded_without_a_host() {
    init_tracing();
    let host = InProcessHost::new();
    let nav = new_stack(&host);

    nav.restore(vec![
        ScreenDescriptor::new(screen("a")),
        ScreenDescriptor::new(screen("b")),
    ]);

    // Popping an unmounted screen must not hang on host signals.
    nav.pop(TransitionOptions::animated()).expect("pop").await;

    assert_eq!(nav.len(), 1);
    assert_eq!(nav.render_entries().len(), 1);
    assert_eq!(nav.last().expect("top").screen_type(), &screen("a"));
}
