// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine feature switches consulted by the unwind handlers.

/// Feature switches for one engine instance.
///
/// Host capabilities live on [`HostConfig`](crate::host::HostConfig); this
/// struct only holds engine-side toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EngineConfig {
    /// Propagate context changes lazily, which requires the suspension
    /// handler to propagate them eagerly for subtrees it skips.
    pub lazy_context_propagation: bool,
    /// Emit scheduling-profiler marks for suspended and errored components.
    pub scheduling_profiler: bool,
    /// Emit debug log lines for nodes in
    /// [`Mode::DEBUG_TRACING`](crate::node::Mode::DEBUG_TRACING).
    pub debug_tracing: bool,
    /// Ask the scheduler to restore tracking of in-flight updaters after a
    /// suspension.
    pub updater_tracking: bool,
    /// Hide partially rendered content behind an off-screen container when a
    /// persistent host mounts a legacy suspense boundary.
    pub persistent_offscreen_container: bool,
}

impl EngineConfig {
    /// Production defaults: diagnostics off, lazy context propagation on.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lazy_context_propagation: true,
            scheduling_profiler: false,
            debug_tracing: false,
            updater_tracking: false,
            persistent_offscreen_container: true,
        }
    }

    /// Development defaults: every diagnostic on.
    #[must_use]
    pub const fn development() -> Self {
        Self {
            scheduling_profiler: true,
            debug_tracing: true,
            updater_tracking: true,
            ..Self::new()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
