// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exception and suspension unwinding.
//!
//! When evaluating a node fails, the forward evaluator stops and hands the
//! thrown value to [`throw_exception`] exactly once. The handlers here walk
//! the return chain looking for a node that can absorb the value:
//!
//! - a [`Wakeable`] goes to [`handle_suspension`], which looks for a
//!   suspense boundary and registers a resume [`Ping`](crate::wakeable::Ping)
//!   via [`attach_ping_listener`];
//! - an error (or a suspension nobody can show a fallback for) goes to
//!   [`handle_error`], which looks for an error boundary and ends at the root.
//!
//! Handlers never fail. They mark flags, lanes and update queues on nodes of
//! the work-in-progress tree and return; the evaluator re-reads the flags to
//! decide where to resume.

mod context;
mod error;
mod ping;
mod suspense;

pub use context::propagate_context_changes_to_deferred_tree;
pub use error::handle_error;
pub use ping::attach_ping_listener;
pub use suspense::handle_suspension;

use alloc::rc::Rc;
use core::fmt;

use crate::error::ErrorValue;
use crate::node::NodeId;
use crate::pass::RenderPass;
use crate::root::Root;
use crate::trace::ComponentErroredEvent;
use crate::wakeable::{Wakeable, WakeableKey};

/// A value thrown while evaluating a node.
#[derive(Clone)]
pub enum Thrown {
    /// A synchronous error.
    Error(ErrorValue),
    /// An unfinished asynchronous dependency.
    Suspended(Rc<dyn Wakeable>),
}

impl fmt::Debug for Thrown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(error) => f.debug_tuple("Error").field(&format_args!("{error}")).finish(),
            Self::Suspended(wakeable) => f
                .debug_tuple("Suspended")
                .field(&WakeableKey::of(wakeable))
                .finish(),
        }
    }
}

/// Unwinds from `source`, whose evaluation threw `thrown`.
///
/// `parent` is the node `source` was being evaluated under. The lanes come
/// from [`RenderPass::render_lanes`].
pub fn throw_exception(
    root: &mut Root,
    pass: &mut RenderPass<'_>,
    parent: NodeId,
    source: NodeId,
    thrown: Thrown,
) {
    let lanes = pass.render_lanes();
    match thrown {
        Thrown::Suspended(wakeable) => {
            handle_suspension(root, pass, parent, source, wakeable, lanes);
        }
        Thrown::Error(error) => {
            if pass.config().scheduling_profiler {
                let name = root.tree.display_name(source);
                pass.tracer().component_errored(&ComponentErroredEvent {
                    node: source,
                    name,
                    lanes,
                });
            }
            handle_error(root, pass, parent, source, error, lanes);
        }
    }
}
