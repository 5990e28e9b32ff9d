// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node kinds, flag bits and evaluation modes.

use bitflags::bitflags;

/// What a node represents in the render tree.
///
/// The unwind handlers only branch on a few of these; the rest exist so a tree
/// can be described faithfully.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The host root. Always terminates an ancestor walk.
    Root,
    /// A stateful component with an instance; the only kind that can act as
    /// an error boundary.
    Stateful,
    /// A stateful component whose first mount was interrupted.
    IncompleteStateful,
    /// A deferred-content boundary that can show fallback content.
    Suspense,
    /// A plain function component.
    Function,
    /// A function component that forwards a handle to its child.
    Forwarding,
    /// A memoized function component.
    MemoFunction,
    /// Provides a context value to its subtree.
    Provider,
    /// A host element.
    Host,
    /// A host text node.
    Text,
    /// The off-screen wrapper a deferred-content boundary renders its primary
    /// children into.
    Offscreen,
    /// A keyed grouping with no host output of its own.
    Fragment,
}

impl NodeKind {
    /// Returns whether this kind is one of the function component variants.
    #[inline]
    #[must_use]
    pub const fn is_function_like(self) -> bool {
        matches!(self, Self::Function | Self::Forwarding | Self::MemoFunction)
    }
}

bitflags! {
    /// Per-node side-effect and unwind bits.
    ///
    /// During an unwind pass bits are only ever added; the evaluator clears
    /// them when it starts the next pass.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u32 {
        /// Node must be inserted into the host tree.
        const PLACEMENT = 1 << 1;
        /// Node has an update to commit.
        const UPDATE = 1 << 2;
        /// One or more children are being deleted.
        const CHILD_DELETION = 1 << 4;
        /// Node has update callbacks to run on commit.
        const CALLBACK = 1 << 6;
        /// A boundary already captured a thrown value in this pass.
        const DID_CAPTURE = 1 << 7;
        /// Node has a handle attachment to update.
        const REF = 1 << 9;
        /// Node wants a pre-mutation snapshot.
        const SNAPSHOT = 1 << 10;
        /// Node has passive effects.
        const PASSIVE = 1 << 11;
        /// Evaluation of the node did not finish.
        const INCOMPLETE = 1 << 13;
        /// A boundary must re-render to capture a thrown value.
        const SHOULD_CAPTURE = 1 << 14;
        /// Legacy suspension forces this node to re-render synchronously.
        const FORCE_UPDATE_FOR_LEGACY_SUSPENSE = 1 << 15;
        /// Context changes were already propagated below this node.
        const DID_PROPAGATE_CONTEXT = 1 << 16;

        /// Everything that would invoke a mount, update or unmount lifecycle.
        const LIFECYCLE_EFFECT_MASK = Self::PASSIVE.bits()
            | Self::UPDATE.bits()
            | Self::CALLBACK.bits()
            | Self::REF.bits()
            | Self::SNAPSHOT.bits();
    }
}

bitflags! {
    /// How a node's subtree is evaluated.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Mode: u8 {
        /// Incremental, interruptible evaluation. Absent means legacy
        /// fully-synchronous semantics.
        const CONCURRENT = 1 << 0;
        /// Emit debug-tracing log lines for this subtree.
        const DEBUG_TRACING = 1 << 1;
    }
}
