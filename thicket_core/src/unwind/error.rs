// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;

use crate::captured::CapturedValue;
use crate::component::ErrorBoundary;
use crate::error::ErrorValue;
use crate::lanes::Lanes;
use crate::node::{NodeFlags, NodeId, NodeKind, Value};
use crate::pass::RenderPass;
use crate::root::{Root, RootState};
use crate::trace::{CaptureEvent, CaptureKind};
use crate::update::{Payload, Update, UpdateCallback, UpdateTag, create_update};

/// Unwinds an error thrown by `source` while rendering `lanes`.
///
/// Records the error on the pass, then walks up from `parent` to the nearest
/// node that can absorb it and enqueues a capture update there:
///
/// - a stateful error boundary that has not captured yet in this pass and
///   either derives state from errors or has a catch handler that has not
///   failed in this batch;
/// - otherwise the root, which replaces the whole tree with empty output and
///   reports the error as uncaught.
///
/// If the return chain does not end at a root the pass is marked fatally
/// errored.
pub fn handle_error(
    root: &mut Root,
    pass: &mut RenderPass<'_>,
    parent: NodeId,
    source: NodeId,
    value: ErrorValue,
    lanes: Lanes,
) {
    root.tree.insert_flags(source, NodeFlags::INCOMPLETE);
    let captured = CapturedValue::new(value, source, &root.tree);
    pass.render_did_error(captured.clone());

    let target = root.tree.ancestors(parent).find_map(|node| {
        match root.tree.kind(node) {
            NodeKind::Root => Some((node, None)),
            NodeKind::Stateful => capturing_boundary(root, node).map(|b| (node, Some(b))),
            _ => None,
        }
    });

    let lane = lanes.pick_one();
    let (update, kind, node) = match target {
        Some((node, None)) => (root_error_update(node, captured, lane), CaptureKind::Root, node),
        Some((node, Some(boundary))) => (
            boundary_error_update(node, &boundary, captured, lane),
            CaptureKind::ErrorBoundary,
            node,
        ),
        None => {
            pass.mark_fatal();
            return;
        }
    };

    root.tree.insert_flags(node, NodeFlags::SHOULD_CAPTURE);
    root.tree.merge_lanes(node, lane);
    root.tree.enqueue_captured_update(node, update);
    pass.tracer().capture(&CaptureEvent {
        boundary: node,
        source,
        kind,
        lanes: lane,
    });
}

/// Returns the boundary capabilities of `node` if it may capture now.
fn capturing_boundary(root: &Root, node: NodeId) -> Option<ErrorBoundary> {
    if root.tree.has_flags(node, NodeFlags::DID_CAPTURE) {
        return None;
    }
    let component = root.tree.component(node)?;
    let boundary = root.tree.component_info(component).boundary.as_ref()?;
    let usable = boundary.derive().is_some()
        || (boundary.handler().is_some() && !root.is_failed_legacy_boundary(node));
    usable.then(|| boundary.clone())
}

fn root_error_update(node: NodeId, error: CapturedValue, lane: Lanes) -> Update {
    let empty: Value = Rc::new(RootState { element: None });
    create_update(lane)
        .with_tag(UpdateTag::CaptureUpdate)
        .with_payload(Payload::Replace(empty))
        .with_callback(UpdateCallback::ReportUncaught { root: node, error })
}

fn boundary_error_update(
    node: NodeId,
    boundary: &ErrorBoundary,
    error: CapturedValue,
    lane: Lanes,
) -> Update {
    let mut update = create_update(lane).with_tag(UpdateTag::CaptureUpdate);
    if let Some(derive) = boundary.derive() {
        let derive = derive.clone();
        let value = error.value().clone();
        let transform = move |_: Option<&Value>| derive(&value);
        update = update.with_payload(Payload::Transform(Rc::new(transform)));
    }
    let callback = match boundary.handler() {
        Some(handler) => UpdateCallback::DidCatch {
            boundary: node,
            handler: handler.clone(),
            error,
            mark_failed: boundary.derive().is_none(),
        },
        None => UpdateCallback::LogCaptured {
            boundary: node,
            error,
        },
    };
    update.with_callback(callback)
}
