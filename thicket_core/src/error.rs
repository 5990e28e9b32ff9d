// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors produced by the unwind core itself.

use alloc::borrow::Cow;
use alloc::rc::Rc;

use thiserror::Error;

/// A thrown application error.
///
/// Render evaluation is single threaded, so values are reference counted
/// without atomics.
pub type ErrorValue = Rc<dyn core::error::Error>;

/// Label used when the suspending component has no display name.
pub const ANONYMOUS_COMPONENT: &str = "A component";

/// Advice appended to [`MissingSuspenseBoundary`].
pub const ADD_BOUNDARY_HINT: &str = "Add a suspense boundary with a fallback higher in the tree to \
     provide a loading indicator or placeholder to display.";

/// A component suspended and no ancestor could show a fallback for it.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error(
    "{component} suspended while rendering, but no fallback UI was specified.\n\n{}",
    ADD_BOUNDARY_HINT
)]
pub struct MissingSuspenseBoundary {
    /// Display name of the suspending component.
    pub component: Cow<'static, str>,
}

impl MissingSuspenseBoundary {
    /// Creates the error for a component, falling back to a generic label.
    #[must_use]
    pub fn new(component: Option<&str>) -> Self {
        Self {
            component: match component {
                Some(name) => Cow::Owned(name.into()),
                None => Cow::Borrowed(ANONYMOUS_COMPONENT),
            },
        }
    }
}
