// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render tree data model.
//!
//! A *node* is one evaluated unit of the render tree: a component instance,
//! a host element, a boundary. Each node has:
//!
//! - An identity ([`NodeId`]), a generational handle that becomes stale when
//!   the node is destroyed.
//! - Navigation links: `return` (parent-in-progress), first child, next
//!   sibling, and `alternate`, the same logical node in the other tree
//!   generation. Both generations live in one [`NodeStore`]; at most one of
//!   them is mutated by an evaluation pass.
//! - Work state: [`NodeFlags`], evaluation [`Mode`], outstanding
//!   [`Lanes`](crate::lanes::Lanes), and an
//!   [`UpdateQueue`](crate::update::UpdateQueue).
//! - Memoized props and state, kept opaque as [`Value`]s.
//!
//! Nodes are stored in struct-of-arrays layout with index-based handles.

mod context;
mod id;
mod kind;
mod props;
mod store;
mod traverse;

pub use context::{ContextId, ProvidedContext};
pub use id::{INVALID, NodeId};
pub use kind::{Mode, NodeFlags, NodeKind};
pub use props::{Props, SuspenseState, Value};
pub use store::NodeStore;
pub use traverse::{Ancestors, Children};
