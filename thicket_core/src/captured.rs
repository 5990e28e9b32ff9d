// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thrown values wrapped with their diagnostic context.

use alloc::string::String;
use core::fmt::Write;

use crate::error::ErrorValue;
use crate::node::{NodeId, NodeStore};

/// An error together with where it was thrown.
///
/// Built once per thrown value and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct CapturedValue {
    value: ErrorValue,
    source: Option<NodeId>,
    stack: Option<String>,
}

impl CapturedValue {
    /// Captures `value` thrown while evaluating `source`, recording the
    /// component stack from `source` up to the root.
    #[must_use]
    pub fn new(value: ErrorValue, source: NodeId, store: &NodeStore) -> Self {
        Self {
            value,
            source: Some(source),
            stack: Some(component_stack(store, source)),
        }
    }

    /// Wraps a value that did not originate from a node.
    #[must_use]
    pub fn detached(value: ErrorValue) -> Self {
        Self {
            value,
            source: None,
            stack: None,
        }
    }

    /// Returns the original thrown value.
    #[must_use]
    pub fn value(&self) -> &ErrorValue {
        &self.value
    }

    /// Returns the node that threw, if known.
    #[must_use]
    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    /// Returns the component stack, if one was recorded.
    #[must_use]
    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }
}

/// Formats the named components on the return chain starting at `node`,
/// innermost first, one `"\n    in Name"` line each.
#[must_use]
pub fn component_stack(store: &NodeStore, node: NodeId) -> String {
    let mut stack = String::new();
    let mut cursor = Some(node);
    while let Some(id) = cursor {
        if let Some(name) = store.display_name(id) {
            // Writing into a String cannot fail.
            let _ = write!(stack, "\n    in {name}");
        }
        cursor = store.return_node(id);
    }
    stack
}
