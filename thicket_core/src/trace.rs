// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the unwind handlers.
//!
//! This module provides a [`TraceSink`] trait with one method per event the
//! handlers emit. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! Whether an event is *emitted* at all is also decided by
//! [`EngineConfig`](crate::config::EngineConfig): profiler marks need
//! `scheduling_profiler`, debug log lines need `debug_tracing` plus the
//! [`Mode::DEBUG_TRACING`](crate::node::Mode::DEBUG_TRACING) bit on the node.
//!
//! Errors are not routed through here; see
//! [`ErrorReporter`](crate::host::ErrorReporter).

use crate::lanes::Lanes;
use crate::node::NodeId;
use crate::wakeable::WakeableKey;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which kind of boundary captured a thrown value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaptureKind {
    /// A suspense boundary will render its fallback.
    Suspense,
    /// A suspense boundary outside concurrent mode absorbed the suspension
    /// without suspending the commit.
    LegacySuspense,
    /// An error boundary will render recovery state.
    ErrorBoundary,
    /// The root will unmount everything.
    Root,
}

impl CaptureKind {
    /// Short kebab-case name for diagnostics output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Suspense => "suspense",
            Self::LegacySuspense => "legacy-suspense",
            Self::ErrorBoundary => "error-boundary",
            Self::Root => "root",
        }
    }
}

/// Developer-facing warnings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// An error boundary without state derivation caught an error and its
    /// handler did not schedule a synchronous update.
    MissingDeriveState,
}

impl WarningKind {
    /// Human readable explanation.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingDeriveState => {
                "Error boundaries should implement a state derivation. In that method, \
                 return a state update to display an error message or fallback UI."
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// A component suspended on a wakeable.
///
/// Emitted both as a scheduling-profiler mark and as a debug log line.
#[derive(Clone, Copy, Debug)]
pub struct ComponentSuspendedEvent<'a> {
    /// The node that suspended.
    pub node: NodeId,
    /// Its display name, if any.
    pub name: Option<&'a str>,
    /// The wakeable it suspended on.
    pub wakeable: WakeableKey,
    /// Lanes being rendered.
    pub lanes: Lanes,
}

/// A component threw an error (scheduling-profiler mark).
#[derive(Clone, Copy, Debug)]
pub struct ComponentErroredEvent<'a> {
    /// The node that threw.
    pub node: NodeId,
    /// Its display name, if any.
    pub name: Option<&'a str>,
    /// Lanes being rendered.
    pub lanes: Lanes,
}

/// A boundary captured a thrown value.
#[derive(Clone, Copy, Debug)]
pub struct CaptureEvent {
    /// The capturing boundary.
    pub boundary: NodeId,
    /// The node that threw.
    pub source: NodeId,
    /// What kind of capture happened.
    pub kind: CaptureKind,
    /// Lanes the boundary will retry at.
    pub lanes: Lanes,
}

/// A developer warning about a node.
#[derive(Clone, Copy, Debug)]
pub struct WarningEvent<'a> {
    /// The node the warning is about.
    pub node: NodeId,
    /// Its display name, if any.
    pub name: Option<&'a str>,
    /// What is wrong.
    pub kind: WarningKind,
}

/// In-flight updaters must be re-tracked for `lanes` after a suspension.
#[derive(Clone, Copy, Debug)]
pub struct RestoreUpdatersEvent {
    /// The current root node.
    pub root: NodeId,
    /// Lanes being rendered.
    pub lanes: Lanes,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the unwind handlers.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Scheduling-profiler mark: a component suspended.
    fn on_component_suspended(&mut self, e: &ComponentSuspendedEvent<'_>) {
        _ = e;
    }

    /// Scheduling-profiler mark: a component threw an error.
    fn on_component_errored(&mut self, e: &ComponentErroredEvent<'_>) {
        _ = e;
    }

    /// Debug-tracing log line: a component suspended.
    fn on_debug_suspended(&mut self, e: &ComponentSuspendedEvent<'_>) {
        _ = e;
    }

    /// Called when a boundary captures a thrown value.
    fn on_capture(&mut self, e: &CaptureEvent) {
        _ = e;
    }

    /// Called with a developer warning.
    fn on_warning(&mut self, e: &WarningEvent<'_>) {
        _ = e;
    }

    /// Called when updater tracking must be restored.
    fn on_restore_updaters(&mut self, e: &RestoreUpdatersEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Returns whether events reach a sink.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }

    /// Reborrows the tracer for a shorter scope.
    #[inline]
    pub fn reborrow(&mut self) -> Tracer<'_> {
        #[cfg(feature = "trace")]
        {
            Tracer {
                sink: self.sink.as_mut().map(|s| &mut **s as &mut dyn TraceSink),
            }
        }
        #[cfg(not(feature = "trace"))]
        {
            Tracer {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a profiler [`ComponentSuspendedEvent`].
    #[inline]
    pub fn component_suspended(&mut self, e: &ComponentSuspendedEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_component_suspended(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ComponentErroredEvent`].
    #[inline]
    pub fn component_errored(&mut self, e: &ComponentErroredEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_component_errored(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a debug-tracing [`ComponentSuspendedEvent`].
    #[inline]
    pub fn debug_suspended(&mut self, e: &ComponentSuspendedEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_debug_suspended(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CaptureEvent`].
    #[inline]
    pub fn capture(&mut self, e: &CaptureEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_capture(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`WarningEvent`].
    #[inline]
    pub fn warning(&mut self, e: &WarningEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_warning(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RestoreUpdatersEvent`].
    #[inline]
    pub fn restore_updaters(&mut self, e: &RestoreUpdatersEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_restore_updaters(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_disabled() {
        assert!(!Tracer::none().is_enabled());
    }

    #[test]
    fn warning_message_mentions_fallback() {
        assert!(
            WarningKind::MissingDeriveState
                .message()
                .contains("fallback UI"),
            "warning should tell the developer what to render"
        );
    }

    #[test]
    fn capture_kind_names_are_distinct() {
        let names = [
            CaptureKind::Suspense,
            CaptureKind::LegacySuspense,
            CaptureKind::ErrorBoundary,
            CaptureKind::Root,
        ]
        .map(CaptureKind::as_str);
        assert_eq!(
            names,
            ["suspense", "legacy-suspense", "error-boundary", "root"],
            "each capture kind has its own label"
        );
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        #[derive(Default)]
        struct Count(u32);
        impl TraceSink for Count {
            fn on_capture(&mut self, _: &CaptureEvent) {
                self.0 += 1;
            }
        }

        let mut sink = Count::default();
        let mut tracer = Tracer::new(&mut sink);
        assert!(tracer.is_enabled());
        let node = NodeId {
            idx: 0,
            generation: 0,
        };
        let event = CaptureEvent {
            boundary: node,
            source: node,
            kind: CaptureKind::Root,
            lanes: Lanes::SYNC,
        };
        tracer.reborrow().capture(&event);
        tracer.capture(&event);
        assert_eq!(sink.0, 2);
    }
}
