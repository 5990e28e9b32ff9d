// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Opaque values carried by nodes.

use alloc::rc::Rc;
use core::any::Any;
use core::fmt;

use crate::wakeable::RetrySet;

/// An opaque, shareable value: component state, props payloads, elements.
pub type Value = Rc<dyn Any>;

/// Props of a node as far as the unwind core cares: an opaque payload and
/// the children value.
#[derive(Clone, Default)]
pub struct Props {
    /// Everything except children.
    pub value: Option<Value>,
    /// The children value.
    pub children: Option<Value>,
}

impl Props {
    /// Props carrying only children.
    #[must_use]
    pub fn with_children(children: Value) -> Self {
        Self {
            value: None,
            children: Some(children),
        }
    }
}

impl fmt::Debug for Props {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Props")
            .field("value", &self.value.is_some())
            .field("children", &self.children.is_some())
            .finish()
    }
}

/// Per-boundary state of a [`NodeKind::Suspense`](super::NodeKind::Suspense)
/// node.
#[derive(Clone, Debug, Default)]
pub struct SuspenseState {
    /// The boundary prefers to keep showing stale content over its fallback
    /// when a parent boundary is already hidden.
    pub avoid_this_fallback: bool,
    /// The committed boundary is currently showing its fallback.
    pub showing_fallback: bool,
    /// The committed boundary still holds server-rendered content that was
    /// never hydrated.
    pub dehydrated: bool,
    /// Wakeables the boundary waits on before retrying its primary content.
    pub(crate) retry: Option<RetrySet>,
}

impl SuspenseState {
    /// Returns the wakeables this boundary waits on, if any were recorded.
    #[must_use]
    pub fn retry_set(&self) -> Option<&RetrySet> {
        self.retry.as_ref()
    }
}
