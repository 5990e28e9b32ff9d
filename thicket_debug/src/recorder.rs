// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps an owned copy of every
//! event in arrival order. Borrowed names are copied into [`String`]s so the
//! recording outlives the render pass that produced it.

use thicket_core::lanes::Lanes;
use thicket_core::node::NodeId;
use thicket_core::trace::{
    CaptureEvent, CaptureKind, ComponentErroredEvent, ComponentSuspendedEvent,
    RestoreUpdatersEvent, TraceSink, WarningEvent, WarningKind,
};
use thicket_core::wakeable::WakeableKey;

/// An owned trace event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A component suspended (scheduling profiler mark).
    ComponentSuspended {
        /// Suspending node.
        node: NodeId,
        /// Its display name.
        name: Option<String>,
        /// The wakeable it suspended on.
        wakeable: WakeableKey,
        /// Render lanes.
        lanes: Lanes,
    },
    /// A component threw an error (scheduling profiler mark).
    ComponentErrored {
        /// Throwing node.
        node: NodeId,
        /// Its display name.
        name: Option<String>,
        /// Render lanes.
        lanes: Lanes,
    },
    /// Debug-tracing log line for a suspension.
    DebugSuspended {
        /// Suspending node.
        node: NodeId,
        /// Its display name.
        name: Option<String>,
    },
    /// A boundary captured a thrown value.
    Capture {
        /// Capturing node.
        boundary: NodeId,
        /// Node that threw.
        source: NodeId,
        /// Boundary kind.
        kind: CaptureKind,
        /// Lanes the capture is scheduled at.
        lanes: Lanes,
    },
    /// A developer warning.
    Warning {
        /// Node the warning is about.
        node: NodeId,
        /// Its display name.
        name: Option<String>,
        /// What went wrong.
        kind: WarningKind,
    },
    /// Pending updaters were restored for a root.
    RestoreUpdaters {
        /// Root node.
        root: NodeId,
        /// Render lanes.
        lanes: Lanes,
    },
}

impl RecordedEvent {
    /// Short event name, used for grouping and export.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ComponentSuspended { .. } => "component-suspended",
            Self::ComponentErrored { .. } => "component-errored",
            Self::DebugSuspended { .. } => "debug-suspended",
            Self::Capture { .. } => "capture",
            Self::Warning { .. } => "warning",
            Self::RestoreUpdaters { .. } => "restore-updaters",
        }
    }
}

/// Records trace events into an owned log.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns its events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

fn owned(name: Option<&str>) -> Option<String> {
    name.map(str::to_owned)
}

impl TraceSink for RecorderSink {
    fn on_component_suspended(&mut self, e: &ComponentSuspendedEvent<'_>) {
        self.events.push(RecordedEvent::ComponentSuspended {
            node: e.node,
            name: owned(e.name),
            wakeable: e.wakeable,
            lanes: e.lanes,
        });
    }

    fn on_component_errored(&mut self, e: &ComponentErroredEvent<'_>) {
        self.events.push(RecordedEvent::ComponentErrored {
            node: e.node,
            name: owned(e.name),
            lanes: e.lanes,
        });
    }

    fn on_debug_suspended(&mut self, e: &ComponentSuspendedEvent<'_>) {
        self.events.push(RecordedEvent::DebugSuspended {
            node: e.node,
            name: owned(e.name),
        });
    }

    fn on_capture(&mut self, e: &CaptureEvent) {
        self.events.push(RecordedEvent::Capture {
            boundary: e.boundary,
            source: e.source,
            kind: e.kind,
            lanes: e.lanes,
        });
    }

    fn on_warning(&mut self, e: &WarningEvent<'_>) {
        self.events.push(RecordedEvent::Warning {
            node: e.node,
            name: owned(e.name),
            kind: e.kind,
        });
    }

    fn on_restore_updaters(&mut self, e: &RestoreUpdatersEvent) {
        self.events.push(RecordedEvent::RestoreUpdaters {
            root: e.root,
            lanes: e.lanes,
        });
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::rc::Rc;

    use thicket_core::node::{Mode, NodeKind, NodeStore};
    use thicket_core::wakeable::{Ping, Wakeable};

    use super::*;

    struct Never;

    impl Wakeable for Never {
        fn on_settle(&self, ping: Ping) {
            drop(ping);
        }
    }

    /// Node handles and a wakeable key for building events by hand.
    pub(crate) struct Sample {
        pub(crate) root: NodeId,
        pub(crate) boundary: NodeId,
        pub(crate) node: NodeId,
        pub(crate) wakeable: WakeableKey,
    }

    pub(crate) fn sample() -> Sample {
        let mut store = NodeStore::new();
        let root = store.create_node(NodeKind::Root, Mode::CONCURRENT);
        let boundary = store.create_node(NodeKind::Suspense, Mode::CONCURRENT);
        let node = store.create_node(NodeKind::Function, Mode::CONCURRENT);
        store.append_child(root, boundary);
        store.append_child(boundary, node);
        let wakeable: Rc<dyn Wakeable> = Rc::new(Never);
        Sample {
            root,
            boundary,
            node,
            wakeable: WakeableKey::of(&wakeable),
        }
    }

    #[test]
    fn records_in_arrival_order() {
        let s = sample();
        let mut sink = RecorderSink::new();
        sink.on_restore_updaters(&RestoreUpdatersEvent {
            root: s.root,
            lanes: Lanes::DEFAULT,
        });
        sink.on_component_suspended(&ComponentSuspendedEvent {
            node: s.node,
            name: Some("Avatar"),
            wakeable: s.wakeable,
            lanes: Lanes::DEFAULT,
        });
        sink.on_capture(&CaptureEvent {
            boundary: s.boundary,
            source: s.node,
            kind: CaptureKind::Suspense,
            lanes: Lanes::DEFAULT,
        });

        let names: Vec<_> = sink.events().iter().map(RecordedEvent::name).collect();
        assert_eq!(
            names,
            ["restore-updaters", "component-suspended", "capture"],
            "events should be kept in the order they arrived"
        );
    }

    #[test]
    fn names_are_owned() {
        let s = sample();
        let mut sink = RecorderSink::new();
        {
            let name = String::from("Profile");
            sink.on_warning(&WarningEvent {
                node: s.boundary,
                name: Some(name.as_str()),
                kind: WarningKind::MissingDeriveState,
            });
        }
        assert_eq!(
            sink.into_events(),
            [RecordedEvent::Warning {
                node: s.boundary,
                name: Some(String::from("Profile")),
                kind: WarningKind::MissingDeriveState,
            }],
            "the warning should keep its own copy of the name"
        );
    }

    #[test]
    fn clear_empties_the_log() {
        let s = sample();
        let mut sink = RecorderSink::new();
        sink.on_component_errored(&ComponentErroredEvent {
            node: s.node,
            name: None,
            lanes: Lanes::SYNC,
        });
        assert_eq!(sink.events().len(), 1, "one event recorded");
        sink.clear();
        assert!(sink.events().is_empty(), "clear should drop all events");
    }
}
