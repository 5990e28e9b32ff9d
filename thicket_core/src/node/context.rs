// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Context identity for provider and consumer nodes.

/// Identifies a context object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContextId(pub u32);

/// The value a [`NodeKind::Provider`](super::NodeKind::Provider) node supplies.
///
/// Values are opaque to the core; a provider's value counts as changed when
/// its version differs from the one on its previous-generation counterpart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProvidedContext {
    /// Which context is provided.
    pub context: ContextId,
    /// Version of the provided value.
    pub version: u64,
}
