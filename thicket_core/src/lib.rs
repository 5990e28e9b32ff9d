// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exception and suspension unwinding for an incremental render tree.
//!
//! `thicket_core` is the part of a lane-scheduled reconciler that runs when
//! evaluating a node does not complete: the node either threw an error or
//! suspended on an unfinished asynchronous dependency. It is `no_std`
//! compatible (with `alloc`) and stores both tree generations in one
//! struct-of-arrays arena addressed by generational handles.
//!
//! # Architecture
//!
//! ```text
//!   forward evaluator
//!       │ throw_exception(root, pass, parent, source, thrown)
//!       ▼
//!   ┌──────────────────────┐  no boundary   ┌──────────────────┐
//!   │  handle_suspension   │ ─────────────► │   handle_error   │
//!   └──────────────────────┘                └──────────────────┘
//!       │ retry set, ping listener,             │ capture update on the
//!       │ SHOULD_CAPTURE or legacy shim         │ boundary or the root
//!       ▼                                       ▼
//!   node flags / lanes / update queues ──► evaluator resumes
//!
//!   Wakeable settles ──► Ping::fire ──► Root outstanding work
//! ```
//!
//! **[`lanes`]**: Priority lane bitmask.
//!
//! **[`node`]**: Struct-of-arrays render tree with `return`, child,
//! sibling and `alternate` links, per-node flags, lanes, queues and memoized
//! data.
//!
//! **[`component`]**: Component registry entries and the
//! [`ErrorBoundary`](component::ErrorBoundary) capability union.
//!
//! **[`captured`]**: [`CapturedValue`](captured::CapturedValue): a thrown
//! error with its component stack.
//!
//! **[`update`]**: Update records, queues, and commit-time callbacks.
//!
//! **[`wakeable`]**: The [`Wakeable`](wakeable::Wakeable) contract and the
//! one-shot [`Ping`](wakeable::Ping) it receives.
//!
//! **[`root`]**: [`Root`](root::Root): the tree, outstanding work and the
//! ping cache.
//!
//! **[`pass`]**: [`RenderPass`](pass::RenderPass), the per-attempt context
//! threaded through the handlers.
//!
//! **[`unwind`]**: The handlers themselves.
//!
//! **[`policy`]**, **[`host`]**, **[`config`]**: Pluggable suspense capture
//! rule, host capabilities and error reporting, engine switches.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types with
//! a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod captured;
pub mod component;
pub mod config;
pub mod error;
pub mod host;
pub mod lanes;
pub mod node;
pub mod pass;
pub mod policy;
pub mod root;
pub mod trace;
pub mod unwind;
pub mod update;
pub mod wakeable;

#[cfg(test)]
pub(crate) mod testing;
