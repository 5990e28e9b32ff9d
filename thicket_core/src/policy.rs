// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Which suspense boundaries may capture a suspension.

use crate::node::{NodeId, NodeStore};

/// Decides whether a suspense boundary captures a suspension thrown below it.
pub trait SuspensePolicy {
    /// Returns whether `node` (a [`NodeKind::Suspense`](crate::node::NodeKind::Suspense)
    /// node) should capture. `has_invisible_parent` is set when an enclosing
    /// boundary is already hidden.
    fn should_capture(&self, store: &NodeStore, node: NodeId, has_invisible_parent: bool) -> bool;
}

/// The default capture rule.
///
/// - A boundary already showing its fallback lets the suspension through,
///   unless it still holds dehydrated content.
/// - A boundary that asks to avoid its fallback lets the suspension through
///   while a parent boundary is hidden.
/// - Every other boundary captures.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultSuspensePolicy;

impl SuspensePolicy for DefaultSuspensePolicy {
    fn should_capture(&self, store: &NodeStore, node: NodeId, has_invisible_parent: bool) -> bool {
        let Some(state) = store.suspense_state(node) else {
            return true;
        };
        if state.showing_fallback || state.dehydrated {
            return state.dehydrated;
        }
        !(state.avoid_this_fallback && has_invisible_parent)
    }
}
