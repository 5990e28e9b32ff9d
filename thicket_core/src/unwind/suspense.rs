// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;

use super::context::propagate_context_changes_to_deferred_tree;
use super::error::handle_error;
use super::ping::attach_ping_listener;
use crate::error::MissingSuspenseBoundary;
use crate::lanes::Lanes;
use crate::node::{Mode, NodeFlags, NodeId, NodeKind, NodeStore};
use crate::pass::RenderPass;
use crate::policy::SuspensePolicy;
use crate::root::Root;
use crate::trace::{CaptureEvent, CaptureKind, ComponentSuspendedEvent, RestoreUpdatersEvent};
use crate::update::{UpdateQueue, UpdateTag, create_update};
use crate::wakeable::{RetrySet, Wakeable, WakeableKey};

/// Unwinds a suspension thrown by `source` while rendering `lanes`.
///
/// Finds the nearest suspense boundary above `parent` that agrees to
/// capture, records `wakeable` in its retry set and registers a resume
/// listener. A concurrent boundary is marked to render its fallback. A
/// legacy boundary absorbs the suspension without suspending the commit:
/// `source` is forced to re-render synchronously instead.
///
/// With no boundary to capture, the suspension becomes a
/// [`MissingSuspenseBoundary`] error handled by [`handle_error`].
pub fn handle_suspension(
    root: &mut Root,
    pass: &mut RenderPass<'_>,
    parent: NodeId,
    source: NodeId,
    wakeable: Rc<dyn Wakeable>,
    lanes: Lanes,
) {
    root.tree.insert_flags(source, NodeFlags::INCOMPLETE);

    if pass.config().updater_tracking {
        pass.tracer().restore_updaters(&RestoreUpdatersEvent {
            root: root.node(),
            lanes,
        });
    }

    if pass.config().lazy_context_propagation && root.tree.alternate(source).is_some() {
        propagate_context_changes_to_deferred_tree(&mut root.tree, source, lanes);
    }

    trace_suspended(root, pass, source, &wakeable, lanes);
    reset_suspended_component(&mut root.tree, source);

    let Some(boundary) =
        nearest_suspense_boundary(&root.tree, pass.policy(), parent, pass.has_invisible_parent())
    else {
        let error = MissingSuspenseBoundary::new(root.tree.display_name(source));
        handle_error(root, pass, parent, source, Rc::new(error), lanes);
        return;
    };

    if let Some(state) = root.tree.suspense_state_mut(boundary) {
        state
            .retry
            .get_or_insert_with(RetrySet::default)
            .insert(wakeable.clone());
    }
    attach_ping_listener(root, pass, &wakeable, lanes);

    if !root.tree.mode(boundary).contains(Mode::CONCURRENT) && boundary != parent {
        capture_legacy(root, pass, boundary, source);
        return;
    }

    root.tree.insert_flags(boundary, NodeFlags::SHOULD_CAPTURE);
    root.tree.set_lanes(boundary, lanes);
    pass.tracer().capture(&CaptureEvent {
        boundary,
        source,
        kind: CaptureKind::Suspense,
        lanes,
    });
}

fn trace_suspended(
    root: &Root,
    pass: &mut RenderPass<'_>,
    source: NodeId,
    wakeable: &Rc<dyn Wakeable>,
    lanes: Lanes,
) {
    let event = ComponentSuspendedEvent {
        node: source,
        name: root.tree.display_name(source),
        wakeable: WakeableKey::of(wakeable),
        lanes,
    };
    if pass.config().debug_tracing && root.tree.mode(source).contains(Mode::DEBUG_TRACING) {
        pass.tracer().debug_suspended(&event);
    }
    if pass.config().scheduling_profiler {
        pass.tracer().component_suspended(&event);
    }
}

/// Rolls a legacy-mode function component back to its committed state so
/// writes from the aborted render do not leak into the retry.
fn reset_suspended_component(store: &mut NodeStore, source: NodeId) {
    if store.mode(source).contains(Mode::CONCURRENT) || !store.kind(source).is_function_like() {
        return;
    }
    match store.alternate(source) {
        Some(current) => {
            let queue = store.updates(current).clone();
            let state = store.memoized_state(current).cloned();
            let lanes = store.lanes(current);
            store.set_updates(source, queue);
            store.set_memoized_state(source, state);
            store.set_lanes(source, lanes);
        }
        None => {
            store.set_updates(source, UpdateQueue::default());
            store.set_memoized_state(source, None);
            store.set_lanes(source, Lanes::NONE);
        }
    }
}

/// Walks up from `start` to the first suspense boundary that captures.
///
/// Boundaries that already captured in this pass are passed over.
fn nearest_suspense_boundary(
    store: &NodeStore,
    policy: &dyn SuspensePolicy,
    start: NodeId,
    has_invisible_parent: bool,
) -> Option<NodeId> {
    store.ancestors(start).find(|&node| {
        store.kind(node) == NodeKind::Suspense
            && !store.has_flags(node, NodeFlags::DID_CAPTURE)
            && policy.should_capture(store, node, has_invisible_parent)
    })
}

/// Legacy capture: the boundary commits as already captured and `source`
/// commits as if it rendered nothing, then re-renders synchronously.
fn capture_legacy(root: &mut Root, pass: &mut RenderPass<'_>, boundary: NodeId, source: NodeId) {
    let store = &mut root.tree;
    store.insert_flags(boundary, NodeFlags::DID_CAPTURE);
    store.insert_flags(source, NodeFlags::FORCE_UPDATE_FOR_LEGACY_SUSPENSE);
    store.remove_flags(
        source,
        NodeFlags::LIFECYCLE_EFFECT_MASK | NodeFlags::INCOMPLETE,
    );

    if pass.host().supports_persistence()
        && pass.config().persistent_offscreen_container
        && store.alternate(boundary).is_none()
    {
        hide_offscreen_container(store, pass, boundary);
    }

    if store.kind(source) == NodeKind::Stateful {
        if store.alternate(source).is_none() {
            store.set_kind(source, NodeKind::IncompleteStateful);
        } else {
            let update = create_update(Lanes::SYNC).with_tag(UpdateTag::ForceUpdate);
            store.enqueue_update(source, update, Lanes::SYNC);
        }
    }
    store.merge_lanes(source, Lanes::SYNC);

    pass.tracer().capture(&CaptureEvent {
        boundary,
        source,
        kind: CaptureKind::LegacySuspense,
        lanes: Lanes::SYNC,
    });
}

/// Swaps the props of the boundary's off-screen container for hidden ones,
/// keeping its children.
fn hide_offscreen_container(store: &mut NodeStore, pass: &RenderPass<'_>, boundary: NodeId) {
    let Some(container) = store
        .first_child(boundary)
        .and_then(|offscreen| store.first_child(offscreen))
    else {
        return;
    };
    let children = store.memoized_props(container).children.clone();
    let props = pass.host().hidden_container_props(children);
    store.set_pending_props(container, props.clone());
    store.set_memoized_props(container, props);
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::component::Component;
    use crate::config::EngineConfig;
    use crate::host::{HiddenContainer, MutationHost, PersistentHost};
    use crate::node::{ContextId, Props, ProvidedContext, SuspenseState};
    use crate::testing::{ManualWakeable, child, new_root, new_root_in};
    use crate::unwind::{Thrown, throw_exception};
    use crate::update::Update;

    fn suspend(
        root: &mut Root,
        pass: &mut RenderPass<'_>,
        parent: NodeId,
        source: NodeId,
    ) -> Rc<ManualWakeable> {
        let manual = Rc::new(ManualWakeable::default());
        throw_exception(root, pass, parent, source, Thrown::Suspended(manual.clone()));
        manual
    }

    fn retry_len(root: &Root, boundary: NodeId) -> usize {
        root.tree()
            .suspense_state(boundary)
            .and_then(SuspenseState::retry_set)
            .map_or(0, RetrySet::len)
    }

    fn root_error_message(root: &Root) -> Option<alloc::string::String> {
        let update = root.tree().updates(root.node()).last()?;
        Some(update.callback()?.error().value().to_string())
    }

    #[test]
    fn nearest_boundary_captures() {
        let mut root = new_root();
        let top = root.node();
        let outer = child(&mut root, top, NodeKind::Suspense);
        let inner = child(&mut root, outer, NodeKind::Suspense);
        let source = child(&mut root, inner, NodeKind::Function);
        let mut pass = RenderPass::new(EngineConfig::new(), &MutationHost, Lanes::DEFAULT);

        let wakeable = suspend(&mut root, &mut pass, inner, source);

        let tree = root.tree();
        assert!(tree.has_flags(inner, NodeFlags::SHOULD_CAPTURE));
        assert_eq!(tree.lanes(inner), Lanes::DEFAULT);
        assert!(tree.flags(outer).is_empty(), "outer boundary is untouched");
        assert!(tree.has_flags(source, NodeFlags::INCOMPLETE));
        assert_eq!(retry_len(&root, inner), 1);
        assert_eq!(retry_len(&root, outer), 0);
        assert_eq!(wakeable.listeners(), 1);
        assert!(!pass.did_error());
    }

    #[test]
    fn boundary_that_already_captured_is_passed_over() {
        let mut root = new_root();
        let top = root.node();
        let outer = child(&mut root, top, NodeKind::Suspense);
        let inner = child(&mut root, outer, NodeKind::Suspense);
        let source = child(&mut root, inner, NodeKind::Function);
        root.tree_mut().insert_flags(inner, NodeFlags::DID_CAPTURE);
        let mut pass = RenderPass::new(EngineConfig::new(), &MutationHost, Lanes::DEFAULT);

        suspend(&mut root, &mut pass, inner, source);

        assert!(root.tree().has_flags(outer, NodeFlags::SHOULD_CAPTURE));
        assert!(!root.tree().has_flags(inner, NodeFlags::SHOULD_CAPTURE));
    }

    #[test]
    fn avoided_fallback_defers_under_invisible_parent() {
        let mut root = new_root();
        let top = root.node();
        let outer = child(&mut root, top, NodeKind::Suspense);
        let inner = child(&mut root, outer, NodeKind::Suspense);
        let source = child(&mut root, inner, NodeKind::Function);
        if let Some(state) = root.tree_mut().suspense_state_mut(inner) {
            state.avoid_this_fallback = true;
        }
        let mut pass = RenderPass::new(EngineConfig::new(), &MutationHost, Lanes::DEFAULT);
        pass.set_suspense_context(crate::pass::SuspenseContext::INVISIBLE_PARENT);

        suspend(&mut root, &mut pass, inner, source);

        assert!(root.tree().has_flags(outer, NodeFlags::SHOULD_CAPTURE));
        assert!(!root.tree().has_flags(inner, NodeFlags::SHOULD_CAPTURE));
    }

    #[test]
    fn same_wakeable_and_lanes_listen_once() {
        let mut root = new_root();
        let top = root.node();
        let boundary = child(&mut root, top, NodeKind::Suspense);
        let first = child(&mut root, boundary, NodeKind::Function);
        let second = child(&mut root, boundary, NodeKind::Function);
        let mut pass = RenderPass::new(EngineConfig::new(), &MutationHost, Lanes::DEFAULT);
        let manual = Rc::new(ManualWakeable::default());

        for source in [first, second] {
            let thrown = Thrown::Suspended(manual.clone());
            throw_exception(&mut root, &mut pass, boundary, source, thrown);
        }
        assert_eq!(manual.listeners(), 1);
        assert_eq!(retry_len(&root, boundary), 1);

        root.mark_suspended(Lanes::DEFAULT);
        assert_eq!(manual.settle(), 1);
        assert_eq!(root.outstanding().pinged, Lanes::DEFAULT);
        assert_eq!(root.pending_lanes(), Lanes::DEFAULT);
    }

    #[test]
    fn no_boundary_names_the_component() {
        let mut root = new_root();
        let top = root.node();
        let source = child(&mut root, top, NodeKind::Function);
        let avatar = root.tree_mut().register_component(Component::named("Avatar"));
        root.tree_mut().set_component(source, Some(avatar));
        let mut pass = RenderPass::new(EngineConfig::new(), &MutationHost, Lanes::DEFAULT);

        suspend(&mut root, &mut pass, top, source);

        assert!(root.tree().has_flags(top, NodeFlags::SHOULD_CAPTURE));
        assert!(pass.did_error());
        assert_eq!(
            root_error_message(&root).as_deref(),
            Some(
                "Avatar suspended while rendering, but no fallback UI was specified.\n\n\
                 Add a suspense boundary with a fallback higher in the tree to provide a \
                 loading indicator or placeholder to display."
            )
        );
    }

    #[test]
    fn no_boundary_uses_generic_label_for_anonymous_component() {
        let mut root = new_root();
        let top = root.node();
        let source = child(&mut root, top, NodeKind::Function);
        let mut pass = RenderPass::new(EngineConfig::new(), &MutationHost, Lanes::DEFAULT);

        suspend(&mut root, &mut pass, top, source);

        let message = root_error_message(&root).unwrap_or_default();
        assert!(
            message.starts_with("A component suspended while rendering"),
            "unexpected message: {message}"
        );
    }

    #[test]
    fn legacy_boundary_never_suspends_the_commit() {
        let mut root = new_root_in(Mode::empty());
        let top = root.node();
        let boundary = child(&mut root, top, NodeKind::Suspense);
        let wrapper = child(&mut root, boundary, NodeKind::Host);
        let source = child(&mut root, wrapper, NodeKind::Stateful);
        root.tree_mut()
            .insert_flags(source, NodeFlags::PASSIVE | NodeFlags::UPDATE);
        let mut pass = RenderPass::new(EngineConfig::new(), &MutationHost, Lanes::DEFAULT);

        let wakeable = suspend(&mut root, &mut pass, wrapper, source);

        let tree = root.tree();
        assert!(!tree.has_flags(boundary, NodeFlags::SHOULD_CAPTURE));
        assert!(tree.has_flags(boundary, NodeFlags::DID_CAPTURE));
        assert!(tree.lanes(source).includes_some(Lanes::SYNC));
        assert!(tree.has_flags(source, NodeFlags::FORCE_UPDATE_FOR_LEGACY_SUSPENSE));
        let cleared = NodeFlags::LIFECYCLE_EFFECT_MASK | NodeFlags::INCOMPLETE;
        assert!(!tree.flags(source).intersects(cleared));
        assert_eq!(tree.kind(source), NodeKind::IncompleteStateful);
        assert_eq!(wakeable.listeners(), 1);
    }

    #[test]
    fn legacy_update_of_mounted_stateful_forces_sync_update() {
        let mut root = new_root_in(Mode::empty());
        let top = root.node();
        let boundary = child(&mut root, top, NodeKind::Suspense);
        let wrapper = child(&mut root, boundary, NodeKind::Host);
        let current = child(&mut root, wrapper, NodeKind::Stateful);
        let source = root.tree_mut().create_work_in_progress(current);
        let mut pass = RenderPass::new(EngineConfig::new(), &MutationHost, Lanes::DEFAULT);

        suspend(&mut root, &mut pass, wrapper, source);

        let tree = root.tree();
        assert_eq!(tree.kind(source), NodeKind::Stateful);
        let update = tree.updates(source).last();
        assert_eq!(update.map(Update::tag), Some(UpdateTag::ForceUpdate));
        assert_eq!(update.map(Update::lane), Some(Lanes::SYNC));
        assert!(tree.lanes(source).includes_some(Lanes::SYNC));
    }

    #[test]
    fn legacy_boundary_that_suspends_directly_captures() {
        let mut root = new_root_in(Mode::empty());
        let top = root.node();
        let boundary = child(&mut root, top, NodeKind::Suspense);
        let source = child(&mut root, boundary, NodeKind::Function);
        let mut pass = RenderPass::new(EngineConfig::new(), &MutationHost, Lanes::DEFAULT);

        suspend(&mut root, &mut pass, boundary, source);

        assert!(root.tree().has_flags(boundary, NodeFlags::SHOULD_CAPTURE));
        assert!(
            !root
                .tree()
                .has_flags(source, NodeFlags::FORCE_UPDATE_FOR_LEGACY_SUSPENSE)
        );
    }

    #[test]
    fn legacy_function_component_rolls_back_to_committed_state() {
        let mut root = new_root_in(Mode::empty());
        let top = root.node();
        let boundary = child(&mut root, top, NodeKind::Suspense);
        let wrapper = child(&mut root, boundary, NodeKind::Host);
        let current = child(&mut root, wrapper, NodeKind::Function);
        let tree = root.tree_mut();
        tree.set_memoized_state(current, Some(Rc::new(1_i32)));
        tree.enqueue_update(current, Update::new(Lanes::DEFAULT), Lanes::DEFAULT);
        let source = tree.create_work_in_progress(current);
        tree.set_memoized_state(source, Some(Rc::new(2_i32)));
        tree.set_updates(source, UpdateQueue::default());
        tree.set_lanes(source, Lanes::IDLE);
        let mut pass = RenderPass::new(EngineConfig::new(), &MutationHost, Lanes::DEFAULT);

        suspend(&mut root, &mut pass, wrapper, source);

        let tree = root.tree();
        let state = tree
            .memoized_state(source)
            .and_then(|v| v.downcast_ref::<i32>())
            .copied();
        assert_eq!(state, Some(1));
        assert_eq!(tree.updates(source).len(), 1);
        assert_eq!(tree.lanes(source), Lanes::DEFAULT | Lanes::SYNC);
    }

    #[test]
    fn legacy_function_component_without_counterpart_is_cleared() {
        let mut root = new_root_in(Mode::empty());
        let top = root.node();
        let boundary = child(&mut root, top, NodeKind::Suspense);
        let wrapper = child(&mut root, boundary, NodeKind::Host);
        let source = child(&mut root, wrapper, NodeKind::MemoFunction);
        root.tree_mut()
            .set_memoized_state(source, Some(Rc::new(2_i32)));
        let mut pass = RenderPass::new(EngineConfig::new(), &MutationHost, Lanes::DEFAULT);

        suspend(&mut root, &mut pass, wrapper, source);

        assert!(root.tree().memoized_state(source).is_none());
        assert!(root.tree().updates(source).is_empty());
        assert_eq!(root.tree().lanes(source), Lanes::SYNC);
    }

    #[test]
    fn concurrent_function_component_keeps_its_state() {
        let mut root = new_root();
        let top = root.node();
        let boundary = child(&mut root, top, NodeKind::Suspense);
        let source = child(&mut root, boundary, NodeKind::Function);
        root.tree_mut()
            .set_memoized_state(source, Some(Rc::new(2_i32)));
        let mut pass = RenderPass::new(EngineConfig::new(), &MutationHost, Lanes::DEFAULT);

        suspend(&mut root, &mut pass, boundary, source);

        assert!(root.tree().memoized_state(source).is_some());
    }

    /// A boundary that never captures.
    struct RefuseAll;

    impl SuspensePolicy for RefuseAll {
        fn should_capture(&self, _: &NodeStore, _: NodeId, _: bool) -> bool {
            false
        }
    }

    #[test]
    fn refusing_policy_falls_through_to_root() {
        let mut root = new_root();
        let top = root.node();
        let boundary = child(&mut root, top, NodeKind::Suspense);
        let source = child(&mut root, boundary, NodeKind::Function);
        let mut pass = RenderPass::new(EngineConfig::new(), &MutationHost, Lanes::DEFAULT)
            .with_policy(&RefuseAll);

        let wakeable = suspend(&mut root, &mut pass, boundary, source);

        assert!(!root.tree().has_flags(boundary, NodeFlags::SHOULD_CAPTURE));
        assert_eq!(retry_len(&root, boundary), 0);
        assert_eq!(wakeable.listeners(), 0, "nobody listens without a boundary");
        assert!(root.tree().has_flags(top, NodeFlags::SHOULD_CAPTURE));
        let message = root_error_message(&root).unwrap_or_default();
        assert!(
            message.contains("no fallback UI was specified"),
            "unexpected message: {message}"
        );
    }

    const THEME: ContextId = ContextId(7);

    /// provider(THEME) -> boundary -> source -> consumer(THEME), where the
    /// in-progress provider carries a newer THEME version and `source` is the
    /// in-progress copy of a committed node.
    fn context_tree(root: &mut Root) -> (NodeId, NodeId, NodeId) {
        let top = root.node();
        let provider = child(root, top, NodeKind::Provider);
        let boundary = child(root, provider, NodeKind::Suspense);
        let current = child(root, boundary, NodeKind::Function);
        let consumer = child(root, current, NodeKind::Function);
        let tree = root.tree_mut();
        tree.add_dependency(consumer, THEME);
        tree.set_provided_context(
            provider,
            Some(ProvidedContext {
                context: THEME,
                version: 1,
            }),
        );
        let wip_provider = tree.create_work_in_progress(provider);
        tree.set_provided_context(
            wip_provider,
            Some(ProvidedContext {
                context: THEME,
                version: 2,
            }),
        );
        tree.set_return(boundary, Some(wip_provider));
        let source = tree.create_work_in_progress(current);
        (boundary, source, consumer)
    }

    #[test]
    fn suspension_propagates_context_changes_below_source() {
        let mut root = new_root();
        let (boundary, source, consumer) = context_tree(&mut root);
        let mut pass = RenderPass::new(EngineConfig::new(), &MutationHost, Lanes::DEFAULT);

        suspend(&mut root, &mut pass, boundary, source);

        assert_eq!(root.tree().lanes(consumer), Lanes::DEFAULT);
        assert!(root.tree().has_flags(source, NodeFlags::DID_PROPAGATE_CONTEXT));
        assert!(root.tree().has_flags(boundary, NodeFlags::SHOULD_CAPTURE));
    }

    #[test]
    fn eager_context_mode_skips_propagation() {
        let mut root = new_root();
        let (boundary, source, consumer) = context_tree(&mut root);
        let config = EngineConfig {
            lazy_context_propagation: false,
            ..EngineConfig::new()
        };
        let mut pass = RenderPass::new(config, &MutationHost, Lanes::DEFAULT);

        suspend(&mut root, &mut pass, boundary, source);

        assert_eq!(root.tree().lanes(consumer), Lanes::NONE);
        assert!(!root.tree().has_flags(source, NodeFlags::DID_PROPAGATE_CONTEXT));
    }

    fn offscreen_tree(root: &mut Root) -> (NodeId, NodeId, NodeId) {
        let top = root.node();
        let boundary = child(root, top, NodeKind::Suspense);
        let offscreen = child(root, boundary, NodeKind::Offscreen);
        let container = child(root, offscreen, NodeKind::Host);
        let source = child(root, container, NodeKind::Function);
        root.tree_mut()
            .set_memoized_props(container, Props::with_children(Rc::new("kids")));
        (boundary, container, source)
    }

    #[test]
    fn persistent_host_hides_container_on_initial_mount() {
        let mut root = new_root_in(Mode::empty());
        let (_, container, source) = offscreen_tree(&mut root);
        let mut pass = RenderPass::new(EngineConfig::new(), &PersistentHost, Lanes::DEFAULT);

        suspend(&mut root, &mut pass, container, source);

        for props in [
            root.tree().memoized_props(container),
            root.tree().pending_props(container),
        ] {
            let hidden = props
                .value
                .as_ref()
                .and_then(|v| v.downcast_ref::<HiddenContainer>());
            assert_eq!(hidden, Some(&HiddenContainer));
            let kids = props
                .children
                .as_ref()
                .and_then(|v| v.downcast_ref::<&'static str>());
            assert_eq!(kids, Some(&"kids"), "children are preserved");
        }
    }

    #[test]
    fn mutation_host_leaves_container_alone() {
        let mut root = new_root_in(Mode::empty());
        let (_, container, source) = offscreen_tree(&mut root);
        let mut pass = RenderPass::new(EngineConfig::new(), &MutationHost, Lanes::DEFAULT);

        suspend(&mut root, &mut pass, container, source);

        assert!(root.tree().memoized_props(container).value.is_none());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn suspension_emits_profiler_and_debug_events() {
        use crate::testing::RecordingSink;
        use crate::trace::Tracer;

        let mut root = new_root_in(Mode::CONCURRENT | Mode::DEBUG_TRACING);
        let top = root.node();
        let boundary = child(&mut root, top, NodeKind::Suspense);
        let source = child(&mut root, boundary, NodeKind::Function);
        let avatar = root.tree_mut().register_component(Component::named("Avatar"));
        root.tree_mut().set_component(source, Some(avatar));

        let mut sink = RecordingSink::default();
        let mut pass = RenderPass::new(EngineConfig::development(), &MutationHost, Lanes::DEFAULT)
            .with_tracer(Tracer::new(&mut sink));
        suspend(&mut root, &mut pass, boundary, source);
        drop(pass);

        assert_eq!(sink.suspended, [source]);
        assert_eq!(sink.debug_lines, ["Avatar suspended"]);
        assert_eq!(sink.captures.len(), 1);
        assert_eq!(sink.captures[0].kind, CaptureKind::Suspense);
        assert_eq!(sink.restored, [Lanes::DEFAULT, Lanes::DEFAULT]);
    }
}
