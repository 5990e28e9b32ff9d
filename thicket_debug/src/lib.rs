// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for thicket
//! diagnostics.
//!
//! This crate provides [`TraceSink`](thicket_core::trace::TraceSink) and
//! [`ErrorReporter`](thicket_core::host::ErrorReporter) implementations for
//! development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: owned in-memory event log, replayable with
//!   [`recorder::RecorderSink::events`].
//! - [`chrome::export`]: writes Chrome Trace Event Format JSON from a
//!   recording.
//! - [`report::WriterReporter`]: writes uncaught and captured errors with
//!   their component stacks.

pub mod chrome;
pub mod pretty;
pub mod recorder;
pub mod report;
