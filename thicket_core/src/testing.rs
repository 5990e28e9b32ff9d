// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for unit tests.

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::captured::CapturedValue;
use crate::component::{CatchHandler, ErrorInfo, Updater};
use crate::error::ErrorValue;
use crate::host::{CapturedErrorLog, ErrorReporter};
#[cfg(feature = "trace")]
use crate::lanes::Lanes;
use crate::node::{Mode, NodeId, NodeKind, NodeStore};
use crate::root::Root;
#[cfg(feature = "trace")]
use crate::trace::{
    CaptureEvent, ComponentErroredEvent, ComponentSuspendedEvent, RestoreUpdatersEvent, TraceSink,
    WarningEvent, WarningKind,
};
use crate::wakeable::{Ping, Wakeable};

/// A plain error with a fixed message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TestError(pub(crate) &'static str);

impl fmt::Display for TestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl core::error::Error for TestError {}

pub(crate) fn error(message: &'static str) -> ErrorValue {
    Rc::new(TestError(message))
}

/// A wakeable that holds its pings until [`settle`](Self::settle) is called.
#[derive(Default)]
pub(crate) struct ManualWakeable {
    registered: Cell<usize>,
    pings: RefCell<Vec<Ping>>,
}

impl ManualWakeable {
    /// Number of pings ever registered.
    pub(crate) fn listeners(&self) -> usize {
        self.registered.get()
    }

    /// Fires every pending ping. Returns how many fired.
    pub(crate) fn settle(&self) -> usize {
        let pings = core::mem::take(&mut *self.pings.borrow_mut());
        let fired = pings.len();
        for ping in pings {
            ping.fire();
        }
        fired
    }
}

impl Wakeable for ManualWakeable {
    fn on_settle(&self, ping: Ping) {
        self.registered.set(self.registered.get() + 1);
        self.pings.borrow_mut().push(ping);
    }
}

/// Reporter that keeps everything it receives.
#[derive(Debug, Default)]
pub(crate) struct CountingReporter {
    pub(crate) uncaught: Vec<String>,
    /// `(boundary name, uncaught)` per logged error.
    pub(crate) logged: Vec<(Option<String>, bool)>,
}

impl ErrorReporter for CountingReporter {
    fn report_uncaught(&mut self, error: &CapturedValue) {
        self.uncaught.push(error.value().to_string());
    }

    fn log_captured(&mut self, log: &CapturedErrorLog<'_>) {
        self.logged
            .push((log.boundary.map(ToString::to_string), log.uncaught));
    }
}

/// Trace sink that records every event.
#[cfg(feature = "trace")]
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub(crate) suspended: Vec<NodeId>,
    pub(crate) errored: Vec<NodeId>,
    pub(crate) debug_lines: Vec<String>,
    pub(crate) captures: Vec<CaptureEvent>,
    pub(crate) warnings: Vec<(NodeId, WarningKind)>,
    pub(crate) restored: Vec<Lanes>,
}

#[cfg(feature = "trace")]
impl TraceSink for RecordingSink {
    fn on_component_suspended(&mut self, e: &ComponentSuspendedEvent<'_>) {
        self.suspended.push(e.node);
    }

    fn on_component_errored(&mut self, e: &ComponentErroredEvent<'_>) {
        self.errored.push(e.node);
    }

    fn on_debug_suspended(&mut self, e: &ComponentSuspendedEvent<'_>) {
        self.debug_lines
            .push(alloc::format!("{} suspended", e.name.unwrap_or("Unknown")));
    }

    fn on_capture(&mut self, e: &CaptureEvent) {
        self.captures.push(*e);
    }

    fn on_warning(&mut self, e: &WarningEvent<'_>) {
        self.warnings.push((e.node, e.kind));
    }

    fn on_restore_updaters(&mut self, e: &RestoreUpdatersEvent) {
        self.restored.push(e.lanes);
    }
}

/// A catch handler that records its calls and can recover by setting state.
#[derive(Default)]
pub(crate) struct RecordingHandler {
    pub(crate) recover: bool,
    pub(crate) caught: RefCell<Vec<(String, String)>>,
}

impl RecordingHandler {
    pub(crate) fn recovering() -> Self {
        Self {
            recover: true,
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.caught.borrow().len()
    }
}

impl CatchHandler for RecordingHandler {
    fn did_catch(&self, error: &ErrorValue, info: &ErrorInfo, updater: &mut Updater<'_>) {
        self.caught
            .borrow_mut()
            .push((error.to_string(), info.component_stack.clone()));
        if self.recover {
            updater.set_state(Rc::new("recovered"));
        }
    }
}

/// A concurrent-mode root with an empty tree under it.
pub(crate) fn new_root() -> Root {
    new_root_in(Mode::CONCURRENT)
}

/// A root whose root node runs in `mode`.
pub(crate) fn new_root_in(mode: Mode) -> Root {
    let mut store = NodeStore::new();
    let node = store.create_node(NodeKind::Root, mode);
    Root::new(store, node)
}

/// Creates a node of `kind` under `parent`, inheriting the parent's mode.
pub(crate) fn child(root: &mut Root, parent: NodeId, kind: NodeKind) -> NodeId {
    let mode = root.tree().mode(parent);
    let node = root.tree_mut().create_node(kind, mode);
    root.tree_mut().append_child(parent, node);
    node
}
