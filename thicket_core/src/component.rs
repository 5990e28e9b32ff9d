// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component metadata and error-boundary capabilities.
//!
//! A component is registered once in the [`NodeStore`](crate::node::NodeStore)
//! and shared by both tree generations of the node that renders it. Whether
//! a stateful component can absorb errors is decided by its
//! [`ErrorBoundary`] variant, never by probing for optional methods.

use alloc::borrow::Cow;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;
use core::fmt;

use crate::error::ErrorValue;
use crate::lanes::Lanes;
use crate::node::{NodeId, NodeStore, Value};
use crate::root::OutstandingWork;
use crate::update::{Payload, Update};

/// Handle to a registered [`Component`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(pub(crate) u32);

/// Derives fallback state from a caught error.
pub type DeriveStateFn = Rc<dyn Fn(&ErrorValue) -> Value>;

/// Side-effecting error handler invoked after a capture commits.
pub trait CatchHandler {
    /// Called with the caught error. `updater` may schedule a state update on
    /// the boundary so it can render fallback content.
    fn did_catch(&self, error: &ErrorValue, info: &ErrorInfo, updater: &mut Updater<'_>);
}

/// Context handed to [`CatchHandler::did_catch`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Component stack of the node that threw; empty when unknown.
    pub component_stack: String,
}

/// Lets a [`CatchHandler`] schedule work on its own node.
pub struct Updater<'a> {
    pub(crate) store: &'a mut NodeStore,
    pub(crate) work: &'a RefCell<OutstandingWork>,
    pub(crate) node: NodeId,
}

impl Updater<'_> {
    /// Replaces the boundary's state at synchronous priority.
    pub fn set_state(&mut self, state: Value) {
        let update = Update::new(Lanes::SYNC).with_payload(Payload::Replace(state));
        self.store.enqueue_update(self.node, update, Lanes::SYNC);
        self.work.borrow_mut().pending |= Lanes::SYNC;
    }

    /// Returns the node the handler is attached to.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl fmt::Debug for Updater<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Updater")
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}

/// The error-absorbing capabilities of a stateful component.
#[derive(Clone)]
pub enum ErrorBoundary {
    /// Only derives fallback state.
    DeriveState(DeriveStateFn),
    /// Only runs a catch handler; the handler must schedule its own update.
    Catch(Rc<dyn CatchHandler>),
    /// Derives fallback state and also runs the handler as a side effect.
    DeriveAndCatch {
        /// State derivation.
        derive: DeriveStateFn,
        /// Side-effecting handler.
        handler: Rc<dyn CatchHandler>,
    },
}

impl ErrorBoundary {
    /// Returns the state derivation, if any.
    #[must_use]
    pub fn derive(&self) -> Option<&DeriveStateFn> {
        match self {
            Self::DeriveState(derive) | Self::DeriveAndCatch { derive, .. } => Some(derive),
            Self::Catch(_) => None,
        }
    }

    /// Returns the catch handler, if any.
    #[must_use]
    pub fn handler(&self) -> Option<&Rc<dyn CatchHandler>> {
        match self {
            Self::Catch(handler) | Self::DeriveAndCatch { handler, .. } => Some(handler),
            Self::DeriveState(_) => None,
        }
    }
}

impl fmt::Debug for ErrorBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DeriveState(_) => "DeriveState",
            Self::Catch(_) => "Catch",
            Self::DeriveAndCatch { .. } => "DeriveAndCatch",
        };
        f.write_str(name)
    }
}

/// A registered component type.
#[derive(Clone, Debug, Default)]
pub struct Component {
    /// Display name used in diagnostics.
    pub name: Option<Cow<'static, str>>,
    /// Error-absorbing capabilities; `None` for components that are not
    /// error boundaries.
    pub boundary: Option<ErrorBoundary>,
}

impl Component {
    /// Creates a named component with no boundary capabilities.
    #[must_use]
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: Some(name.into()),
            boundary: None,
        }
    }

    /// Sets the boundary capabilities.
    #[must_use]
    pub fn with_boundary(mut self, boundary: ErrorBoundary) -> Self {
        self.boundary = Some(boundary);
        self
    }
}
