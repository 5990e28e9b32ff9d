// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pass render context.
//!
//! Everything the unwind handlers would otherwise read from process-wide
//! state lives here: the lanes being rendered, the suspense context at the
//! current depth, and whether the pass has produced an error. The forward
//! evaluator creates one [`RenderPass`] per render attempt and threads it
//! through every handler call.

use alloc::vec::Vec;
use core::fmt;

use bitflags::bitflags;

use crate::captured::CapturedValue;
use crate::config::EngineConfig;
use crate::host::HostConfig;
use crate::lanes::Lanes;
use crate::policy::{DefaultSuspensePolicy, SuspensePolicy};
use crate::trace::Tracer;

bitflags! {
    /// Suspense context bits tracked by the forward evaluator on its way down.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SuspenseContext: u8 {
        /// An enclosing suspense boundary is currently hidden.
        const INVISIBLE_PARENT = 1 << 0;
    }
}

/// How the current render attempt is going to end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExitStatus {
    /// No error so far.
    #[default]
    InProgress,
    /// A render error was captured; the scheduler may retry synchronously.
    Errored,
    /// The pass hit an error the scheduler must not retry.
    FatalErrored,
}

/// Context for one render attempt.
pub struct RenderPass<'a> {
    config: EngineConfig,
    host: &'a dyn HostConfig,
    policy: &'a dyn SuspensePolicy,
    tracer: Tracer<'a>,
    render_lanes: Lanes,
    suspense_context: SuspenseContext,
    exit_status: ExitStatus,
    errors: Vec<CapturedValue>,
}

impl<'a> RenderPass<'a> {
    /// Starts a pass rendering `render_lanes` against `host`.
    #[must_use]
    pub fn new(config: EngineConfig, host: &'a dyn HostConfig, render_lanes: Lanes) -> Self {
        Self {
            config,
            host,
            policy: &DefaultSuspensePolicy,
            tracer: Tracer::none(),
            render_lanes,
            suspense_context: SuspenseContext::empty(),
            exit_status: ExitStatus::InProgress,
            errors: Vec::new(),
        }
    }

    /// Replaces the suspense capture policy.
    #[must_use]
    pub fn with_policy(mut self, policy: &'a dyn SuspensePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Routes trace events to `tracer`.
    #[must_use]
    pub fn with_tracer(mut self, tracer: Tracer<'a>) -> Self {
        self.tracer = tracer;
        self
    }

    /// Engine switches for this pass.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Host capabilities.
    #[must_use]
    pub fn host(&self) -> &'a dyn HostConfig {
        self.host
    }

    /// Suspense capture policy.
    #[must_use]
    pub fn policy(&self) -> &'a dyn SuspensePolicy {
        self.policy
    }

    /// The tracer.
    pub fn tracer(&mut self) -> &mut Tracer<'a> {
        &mut self.tracer
    }

    /// Lanes this pass renders.
    #[must_use]
    pub fn render_lanes(&self) -> Lanes {
        self.render_lanes
    }

    /// Suspense context at the evaluator's current depth.
    #[must_use]
    pub fn suspense_context(&self) -> SuspenseContext {
        self.suspense_context
    }

    /// Sets the suspense context; the evaluator calls this as it enters and
    /// leaves boundaries.
    pub fn set_suspense_context(&mut self, context: SuspenseContext) {
        self.suspense_context = context;
    }

    /// Returns whether an enclosing boundary is hidden.
    #[must_use]
    pub fn has_invisible_parent(&self) -> bool {
        self.suspense_context
            .contains(SuspenseContext::INVISIBLE_PARENT)
    }

    /// Current exit status.
    #[must_use]
    pub fn exit_status(&self) -> ExitStatus {
        self.exit_status
    }

    /// Returns whether any error was captured in this pass.
    #[must_use]
    pub fn did_error(&self) -> bool {
        self.exit_status != ExitStatus::InProgress
    }

    /// Records that this pass produced `error`.
    ///
    /// Moves the exit status to [`ExitStatus::Errored`] unless the pass is
    /// already fatally errored.
    pub fn render_did_error(&mut self, error: CapturedValue) {
        if self.exit_status != ExitStatus::FatalErrored {
            self.exit_status = ExitStatus::Errored;
        }
        self.errors.push(error);
    }

    /// Marks the pass fatally errored.
    pub fn mark_fatal(&mut self) {
        self.exit_status = ExitStatus::FatalErrored;
    }

    /// Errors captured so far, oldest first.
    #[must_use]
    pub fn render_errors(&self) -> &[CapturedValue] {
        &self.errors
    }

    /// Takes the captured errors, e.g. to hand them to a recovery pass.
    pub fn take_render_errors(&mut self) -> Vec<CapturedValue> {
        core::mem::take(&mut self.errors)
    }
}

impl fmt::Debug for RenderPass<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderPass")
            .field("config", &self.config)
            .field("render_lanes", &self.render_lanes)
            .field("suspense_context", &self.suspense_context)
            .field("exit_status", &self.exit_status)
            .field("errors", &self.errors.len())
            .finish_non_exhaustive()
    }
}
