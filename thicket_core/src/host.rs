// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract.
//!
//! The unwind core never touches host output directly. It needs two things
//! from the host integration:
//!
//! - **Capabilities** ([`HostConfig`]): whether the host renders in
//!   persistent (immutable tree) mode, and how to build the props of a hidden
//!   off-screen container.
//! - **Error reporting** ([`ErrorReporter`]): where uncaught errors go, and
//!   where captured errors are logged. Unlike [`Tracer`](crate::trace::Tracer)
//!   events, reporting is always on.

use alloc::rc::Rc;

use crate::captured::CapturedValue;
use crate::node::{Props, Value};

/// Marker stored as the props value of an off-screen container that has
/// been hidden.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HiddenContainer;

/// Host capabilities the unwind core consults.
pub trait HostConfig {
    /// Whether the host uses persistent (clone-on-write) output.
    fn supports_persistence(&self) -> bool {
        false
    }

    /// Builds the props of a hidden off-screen container that still wraps
    /// `children`.
    fn hidden_container_props(&self, children: Option<Value>) -> Props {
        Props {
            value: Some(Rc::new(HiddenContainer)),
            children,
        }
    }
}

/// A host that mutates its output in place.
#[derive(Clone, Copy, Debug, Default)]
pub struct MutationHost;

impl HostConfig for MutationHost {}

/// A host with persistent output.
///
/// Hidden container props carry [`HiddenContainer`] as their value.
#[derive(Clone, Copy, Debug, Default)]
pub struct PersistentHost;

impl HostConfig for PersistentHost {
    fn supports_persistence(&self) -> bool {
        true
    }
}

/// A captured error on its way to the log.
#[derive(Clone, Copy, Debug)]
pub struct CapturedErrorLog<'a> {
    /// The error and its component stack.
    pub error: &'a CapturedValue,
    /// Display name of the boundary that captured it; `None` for the root.
    pub boundary: Option<&'a str>,
    /// Whether no boundary absorbed the error.
    pub uncaught: bool,
}

/// Receives errors surfaced by committed error updates.
pub trait ErrorReporter {
    /// Called once for an error no boundary absorbed.
    fn report_uncaught(&mut self, error: &CapturedValue);

    /// Called for every captured error, caught or not.
    fn log_captured(&mut self, log: &CapturedErrorLog<'_>) {
        _ = log;
    }
}

/// An [`ErrorReporter`] that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopReporter;

impl ErrorReporter for NoopReporter {
    fn report_uncaught(&mut self, error: &CapturedValue) {
        _ = error;
    }
}
