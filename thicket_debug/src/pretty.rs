// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use thicket_core::trace::{
    CaptureEvent, ComponentErroredEvent, ComponentSuspendedEvent,
    RestoreUpdatersEvent, TraceSink, WarningEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_component_suspended(&mut self, e: &ComponentSuspendedEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[suspended] node={:?} name={} wakeable={:?} lanes={:?}",
            e.node,
            e.name.unwrap_or("?"),
            e.wakeable,
            e.lanes,
        );
    }

    fn on_component_errored(&mut self, e: &ComponentErroredEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[errored] node={:?} name={} lanes={:?}",
            e.node,
            e.name.unwrap_or("?"),
            e.lanes,
        );
    }

    fn on_debug_suspended(&mut self, e: &ComponentSuspendedEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[debug] {} suspended",
            e.name.unwrap_or("Unknown"),
        );
    }

    fn on_capture(&mut self, e: &CaptureEvent) {
        let _ = writeln!(
            self.writer,
            "[capture:{}] boundary={:?} source={:?} lanes={:?}",
            e.kind.as_str(),
            e.boundary,
            e.source,
            e.lanes,
        );
    }

    fn on_warning(&mut self, e: &WarningEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[warning] {}: {}",
            e.name.unwrap_or("?"),
            e.kind.message(),
        );
    }

    fn on_restore_updaters(&mut self, e: &RestoreUpdatersEvent) {
        let _ = writeln!(
            self.writer,
            "[updaters] root={:?} lanes={:?}",
            e.root, e.lanes,
        );
    }
}
