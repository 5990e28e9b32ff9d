// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::lanes::Lanes;
use crate::node::{ContextId, NodeFlags, NodeId, NodeKind, NodeStore};

/// Eagerly propagates changed context values into the subtree of `source`.
///
/// With lazy propagation, context changes are pushed to consumers only when
/// the evaluator visits them. A suspended node's children are never visited
/// in this pass, so every consumer below `source` that reads a provider
/// changed above it gets `lanes` scheduled now, with the path back to
/// `source` marked in child lanes.
///
/// The ancestor walk stops at the first node that already propagated.
/// `source` is marked [`NodeFlags::DID_PROPAGATE_CONTEXT`] afterwards.
pub fn propagate_context_changes_to_deferred_tree(
    store: &mut NodeStore,
    source: NodeId,
    lanes: Lanes,
) {
    let changed = changed_contexts(store, source);
    if !changed.is_empty() {
        propagate_into_subtree(store, source, &changed, lanes);
    }
    store.insert_flags(source, NodeFlags::DID_PROPAGATE_CONTEXT);
}

fn changed_contexts(store: &NodeStore, source: NodeId) -> SmallVec<[ContextId; 4]> {
    let mut changed = SmallVec::new();
    for node in store.ancestors(source) {
        if store.has_flags(node, NodeFlags::DID_PROPAGATE_CONTEXT) {
            break;
        }
        if store.kind(node) != NodeKind::Provider {
            continue;
        }
        let (Some(next), Some(prev)) = (
            store.provided_context(node),
            store.alternate(node).and_then(|alt| store.provided_context(alt)),
        ) else {
            continue;
        };
        if next.version != prev.version && !changed.contains(&next.context) {
            changed.push(next.context);
        }
    }
    changed
}

fn propagate_into_subtree(
    store: &mut NodeStore,
    source: NodeId,
    changed: &[ContextId],
    lanes: Lanes,
) {
    let mut stack: Vec<NodeId> = store.children(source).collect();
    while let Some(node) = stack.pop() {
        let reads_changed = store
            .dependencies(node)
            .iter()
            .any(|context| changed.contains(context));
        if reads_changed {
            store.merge_lanes(node, lanes);
            if let Some(alt) = store.alternate(node) {
                store.merge_lanes(alt, lanes);
            }
            schedule_on_parent_path(store, node, source, lanes);
        }
        stack.extend(store.children(node));
    }
}

/// Marks `lanes` in the child lanes of every node between `node` and
/// `source`.
fn schedule_on_parent_path(store: &mut NodeStore, node: NodeId, source: NodeId, lanes: Lanes) {
    let source_alt = store.alternate(source);
    let mut current = store.return_node(node);
    while let Some(parent) = current {
        store.merge_child_lanes(parent, lanes);
        if let Some(alt) = store.alternate(parent) {
            store.merge_child_lanes(alt, lanes);
        }
        if parent == source || Some(parent) == source_alt {
            break;
        }
        current = store.return_node(parent);
    }
}
