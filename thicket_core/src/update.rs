// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Update records and per-node update queues.
//!
//! The unwind handlers only build three kinds of update: a root-level
//! "unmount everything", an error-boundary recovery update, and a forced
//! re-render for legacy suspension. This module carries just enough queue
//! machinery to enqueue them, apply them during the next render of the node,
//! and run their commit-time callbacks.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use crate::captured::CapturedValue;
use crate::component::{CatchHandler, ErrorInfo, Updater};
use crate::host::{CapturedErrorLog, ErrorReporter};
use crate::lanes::Lanes;
use crate::node::{NodeFlags, NodeId, NodeStore, Value};
use crate::root::Root;
use crate::trace::{Tracer, WarningEvent, WarningKind};

/// What an update does besides its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpdateTag {
    /// An ordinary state update.
    Normal,
    /// Re-render even if props and state are unchanged.
    ForceUpdate,
    /// Recovery update produced by a capture; processing it marks the node
    /// [`NodeFlags::DID_CAPTURE`].
    CaptureUpdate,
}

/// Computes new state from the previous one.
pub type TransformFn = Rc<dyn Fn(Option<&Value>) -> Value>;

/// New state carried by an update.
#[derive(Clone, Default)]
pub enum Payload {
    /// Leave state unchanged.
    #[default]
    None,
    /// Replace state with a literal value.
    Replace(Value),
    /// Replace state with the result of a transform, evaluated when the
    /// update is processed.
    Transform(TransformFn),
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Replace(_) => f.write_str("Replace(..)"),
            Self::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}

/// Side effect run once the update's node commits.
#[derive(Clone)]
pub enum UpdateCallback {
    /// Root capture: report the error as uncaught and log it.
    ReportUncaught {
        /// The root node that captured.
        root: NodeId,
        /// The error.
        error: CapturedValue,
    },
    /// Boundary capture with state derivation only: log the error.
    LogCaptured {
        /// The boundary that captured.
        boundary: NodeId,
        /// The error.
        error: CapturedValue,
    },
    /// Boundary capture with a catch handler.
    DidCatch {
        /// The boundary that captured.
        boundary: NodeId,
        /// Handler to invoke.
        handler: Rc<dyn CatchHandler>,
        /// The error.
        error: CapturedValue,
        /// The boundary has no state derivation: mark it failed for the rest
        /// of the batch before running the handler.
        mark_failed: bool,
    },
}

impl UpdateCallback {
    /// The captured error this callback deals with.
    #[must_use]
    pub fn error(&self) -> &CapturedValue {
        match self {
            Self::ReportUncaught { error, .. }
            | Self::LogCaptured { error, .. }
            | Self::DidCatch { error, .. } => error,
        }
    }
}

impl fmt::Debug for UpdateCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReportUncaught { root, .. } => f
                .debug_struct("ReportUncaught")
                .field("root", root)
                .finish_non_exhaustive(),
            Self::LogCaptured { boundary, .. } => f
                .debug_struct("LogCaptured")
                .field("boundary", boundary)
                .finish_non_exhaustive(),
            Self::DidCatch {
                boundary,
                mark_failed,
                ..
            } => f
                .debug_struct("DidCatch")
                .field("boundary", boundary)
                .field("mark_failed", mark_failed)
                .finish_non_exhaustive(),
        }
    }
}

/// A pending change to a node's state.
#[derive(Clone, Debug)]
pub struct Update {
    lane: Lanes,
    tag: UpdateTag,
    payload: Payload,
    callback: Option<UpdateCallback>,
}

impl Update {
    /// A normal update with no payload at `lane`.
    #[must_use]
    pub fn new(lane: Lanes) -> Self {
        Self {
            lane,
            tag: UpdateTag::Normal,
            payload: Payload::None,
            callback: None,
        }
    }

    /// Sets the payload.
    #[must_use]
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Sets the tag.
    #[must_use]
    pub fn with_tag(mut self, tag: UpdateTag) -> Self {
        self.tag = tag;
        self
    }

    /// Sets the commit-time callback.
    #[must_use]
    pub fn with_callback(mut self, callback: UpdateCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// The lane this update was scheduled at.
    #[must_use]
    pub fn lane(&self) -> Lanes {
        self.lane
    }

    /// The update's tag.
    #[must_use]
    pub fn tag(&self) -> UpdateTag {
        self.tag
    }

    /// The update's payload.
    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The commit-time callback, if any.
    #[must_use]
    pub fn callback(&self) -> Option<&UpdateCallback> {
        self.callback.as_ref()
    }
}

/// Creates an empty normal update at `lane`.
#[must_use]
pub fn create_update(lane: Lanes) -> Update {
    Update::new(lane)
}

/// Updates waiting to be applied to one node, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct UpdateQueue {
    pending: Vec<Update>,
}

impl UpdateQueue {
    /// Number of pending updates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Iterates over pending updates, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Update> {
        self.pending.iter()
    }

    /// Returns the most recently enqueued update.
    #[must_use]
    pub fn last(&self) -> Option<&Update> {
        self.pending.last()
    }

    fn push(&mut self, update: Update) {
        self.pending.push(update);
    }
}

/// Result of [`NodeStore::process_update_queue`].
#[derive(Debug, Default)]
pub struct ProcessedUpdates {
    /// Callbacks of the applied updates, to run at commit.
    pub callbacks: Vec<UpdateCallback>,
    /// A [`UpdateTag::ForceUpdate`] was applied; the node must not bail out.
    pub force_update: bool,
}

impl NodeStore {
    /// Enqueues `update` on `node` and records `lane` as outstanding work.
    ///
    /// The lane is merged into the node and its counterpart, and into the
    /// child lanes of every ancestor (and their counterparts) so a render
    /// starting from the root finds it. Returns the root node reached.
    pub fn enqueue_update(&mut self, node: NodeId, update: Update, lane: Lanes) -> Option<NodeId> {
        self.validate(node);
        self.updates[node.idx as usize].push(update);
        self.merge_lanes(node, lane);
        if let Some(alt) = self.alternate(node) {
            self.merge_lanes(alt, lane);
        }

        let mut child = node;
        while let Some(parent) = self.return_node(child) {
            self.merge_child_lanes(parent, lane);
            if let Some(alt) = self.alternate(parent) {
                self.merge_child_lanes(alt, lane);
            }
            child = parent;
        }
        (self.kind(child) == crate::node::NodeKind::Root).then_some(child)
    }

    /// Enqueues an update produced by a capture during the current render.
    ///
    /// Unlike [`enqueue_update`](Self::enqueue_update) this touches neither
    /// lanes nor ancestors: the capturing handler has already scheduled the
    /// node itself.
    pub fn enqueue_captured_update(&mut self, node: NodeId, update: Update) {
        self.validate(node);
        self.updates[node.idx as usize].push(update);
    }

    /// Applies every update on `node` whose lane is in `render_lanes`.
    ///
    /// Applied updates fold into the node's memoized state in order; the
    /// others stay queued and their lanes become the node's lanes. Applying a
    /// capture update turns [`NodeFlags::SHOULD_CAPTURE`] into
    /// [`NodeFlags::DID_CAPTURE`].
    pub fn process_update_queue(&mut self, node: NodeId, render_lanes: Lanes) -> ProcessedUpdates {
        self.validate(node);
        let i = node.idx as usize;
        let queue = core::mem::take(&mut self.updates[i]);

        let mut state = self.memoized_state[i].take();
        let mut remaining = UpdateQueue::default();
        let mut remaining_lanes = Lanes::NONE;
        let mut processed = ProcessedUpdates::default();

        for update in queue.pending {
            if !update.lane.is_subset_of(render_lanes) {
                remaining_lanes |= update.lane;
                remaining.push(update);
                continue;
            }
            match update.tag {
                UpdateTag::CaptureUpdate => {
                    self.flags[i] =
                        (self.flags[i] - NodeFlags::SHOULD_CAPTURE) | NodeFlags::DID_CAPTURE;
                }
                UpdateTag::ForceUpdate => processed.force_update = true,
                UpdateTag::Normal => {}
            }
            match update.payload {
                Payload::None => {}
                Payload::Replace(value) => state = Some(value),
                Payload::Transform(transform) => state = Some(transform(state.as_ref())),
            }
            if let Some(callback) = update.callback {
                processed.callbacks.push(callback);
            }
        }

        if !processed.callbacks.is_empty() {
            self.flags[i] |= NodeFlags::CALLBACK;
        }
        self.memoized_state[i] = state;
        self.updates[i] = remaining;
        self.lanes[i] = remaining_lanes;
        processed
    }
}

/// Runs commit-time update callbacks.
///
/// Reporting goes to `reporter` unconditionally; developer warnings go to
/// `tracer`.
pub fn commit_update_callbacks(
    root: &mut Root,
    callbacks: Vec<UpdateCallback>,
    reporter: &mut dyn ErrorReporter,
    tracer: &mut Tracer<'_>,
) {
    for callback in callbacks {
        match callback {
            UpdateCallback::ReportUncaught { error, .. } => {
                reporter.report_uncaught(&error);
                reporter.log_captured(&CapturedErrorLog {
                    error: &error,
                    boundary: None,
                    uncaught: true,
                });
            }
            UpdateCallback::LogCaptured { boundary, error } => {
                root.failed_boundaries_for_refresh.push(boundary);
                reporter.log_captured(&CapturedErrorLog {
                    error: &error,
                    boundary: root.tree.display_name(boundary),
                    uncaught: false,
                });
            }
            UpdateCallback::DidCatch {
                boundary,
                handler,
                error,
                mark_failed,
            } => {
                root.failed_boundaries_for_refresh.push(boundary);
                if mark_failed {
                    root.failed_legacy_boundaries.insert(boundary);
                }
                reporter.log_captured(&CapturedErrorLog {
                    error: &error,
                    boundary: root.tree.display_name(boundary),
                    uncaught: false,
                });

                let info = ErrorInfo {
                    component_stack: error.stack().unwrap_or_default().into(),
                };
                let (store, work) = root.tree_and_work();
                let mut updater = Updater {
                    store,
                    work,
                    node: boundary,
                };
                handler.did_catch(error.value(), &info, &mut updater);

                if mark_failed && !root.tree.lanes(boundary).includes_some(Lanes::SYNC) {
                    tracer.warning(&WarningEvent {
                        node: boundary,
                        name: root.tree.display_name(boundary),
                        kind: WarningKind::MissingDeriveState,
                    });
                }
            }
        }
    }
}
