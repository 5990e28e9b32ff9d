// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with allocation, topology, and per-node state.

use alloc::vec::Vec;

use smallvec::SmallVec;

use super::context::{ContextId, ProvidedContext};
use super::id::{INVALID, NodeId};
use super::kind::{Mode, NodeFlags, NodeKind};
use super::props::{Props, SuspenseState, Value};
use super::traverse::{Ancestors, Children};
use crate::component::{Component, ComponentId};
use crate::lanes::Lanes;
use crate::update::UpdateQueue;

/// Struct-of-arrays storage for the nodes of both tree generations.
///
/// Nodes are addressed by [`NodeId`] handles. Internally, each node occupies
/// a slot in parallel arrays. Destroyed nodes are recycled via a free list,
/// and generation counters prevent stale handle access.
///
/// The `return` and `alternate` links are plain indices: the store owns every
/// node, the links are navigation only.
#[derive(Debug)]
pub struct NodeStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) alternate: Vec<u32>,

    // -- Identity --
    pub(crate) kind: Vec<NodeKind>,
    pub(crate) mode: Vec<Mode>,
    pub(crate) component: Vec<Option<ComponentId>>,

    // -- Work --
    pub(crate) flags: Vec<NodeFlags>,
    pub(crate) lanes: Vec<Lanes>,
    pub(crate) child_lanes: Vec<Lanes>,
    pub(crate) updates: Vec<UpdateQueue>,

    // -- Memoized data --
    pub(crate) pending_props: Vec<Props>,
    pub(crate) memoized_props: Vec<Props>,
    pub(crate) memoized_state: Vec<Option<Value>>,
    pub(crate) suspense: Vec<Option<SuspenseState>>,
    pub(crate) provides: Vec<Option<ProvidedContext>>,
    pub(crate) dependencies: Vec<SmallVec<[ContextId; 2]>>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Component registry --
    components: Vec<Component>,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore {
    /// Creates an empty node store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            alternate: Vec::new(),
            kind: Vec::new(),
            mode: Vec::new(),
            component: Vec::new(),
            flags: Vec::new(),
            lanes: Vec::new(),
            child_lanes: Vec::new(),
            updates: Vec::new(),
            pending_props: Vec::new(),
            memoized_props: Vec::new(),
            memoized_state: Vec::new(),
            suspense: Vec::new(),
            provides: Vec::new(),
            dependencies: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            components: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a detached node and returns its handle.
    ///
    /// The node starts with no flags, no lanes, empty props and state, and
    /// no links. Suspense nodes get a default [`SuspenseState`].
    pub fn create_node(&mut self, kind: NodeKind, mode: Mode) -> NodeId {
        let suspense = (kind == NodeKind::Suspense).then(SuspenseState::default);
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.generation[i] += 1;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.alternate[i] = INVALID;
            self.kind[i] = kind;
            self.mode[i] = mode;
            self.component[i] = None;
            self.flags[i] = NodeFlags::empty();
            self.lanes[i] = Lanes::NONE;
            self.child_lanes[i] = Lanes::NONE;
            self.updates[i] = UpdateQueue::default();
            self.pending_props[i] = Props::default();
            self.memoized_props[i] = Props::default();
            self.memoized_state[i] = None;
            self.suspense[i] = suspense;
            self.provides[i] = None;
            self.dependencies[i].clear();
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.alternate.push(INVALID);
            self.kind.push(kind);
            self.mode.push(mode);
            self.component.push(None);
            self.flags.push(NodeFlags::empty());
            self.lanes.push(Lanes::NONE);
            self.child_lanes.push(Lanes::NONE);
            self.updates.push(UpdateQueue::default());
            self.pending_props.push(Props::default());
            self.memoized_props.push(Props::default());
            self.memoized_state.push(None);
            self.suspense.push(suspense);
            self.provides.push(None);
            self.dependencies.push(SmallVec::new());
            self.generation.push(0);
            idx
        };
        self.id_at(idx)
    }

    /// Destroys a node, freeing its slot for reuse.
    ///
    /// The node is unlinked from its parent and from its alternate.
    ///
    /// # Panics
    ///
    /// Panics if the node has children (destroy them first) or if the handle
    /// is stale.
    pub fn destroy_node(&mut self, id: NodeId) {
        self.validate(id);
        let idx = id.idx as usize;
        // Children shared with a counterpart belong to that counterpart.
        assert!(
            self.first_child[idx] == INVALID
                || self.parent[self.first_child[idx] as usize] != id.idx,
            "cannot destroy node with children"
        );
        if self.parent[idx] != INVALID {
            self.unlink_from_parent(id.idx);
        }
        let alt = self.alternate[idx];
        if alt != INVALID {
            self.alternate[alt as usize] = INVALID;
            self.alternate[idx] = INVALID;
        }
        self.generation[idx] += 1;
        self.free_list.push(id.idx);
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Component registry --

    /// Registers a component type and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` components are registered.
    pub fn register_component(&mut self, component: Component) -> ComponentId {
        let Ok(idx) = u32::try_from(self.components.len()) else {
            panic!("component registry is full");
        };
        self.components.push(component);
        ComponentId(idx)
    }

    /// Returns a registered component.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this store.
    #[must_use]
    pub fn component_info(&self, id: ComponentId) -> &Component {
        &self.components[id.0 as usize]
    }

    /// Returns the component a node renders, if any.
    #[must_use]
    pub fn component(&self, id: NodeId) -> Option<ComponentId> {
        self.validate(id);
        self.component[id.idx as usize]
    }

    /// Sets the component a node renders.
    pub fn set_component(&mut self, id: NodeId, component: Option<ComponentId>) {
        self.validate(id);
        self.component[id.idx as usize] = component;
    }

    /// Returns the display name of the node's component, if it has one.
    #[must_use]
    pub fn display_name(&self, id: NodeId) -> Option<&str> {
        self.component(id)
            .and_then(|c| self.components[c.0 as usize].name.as_deref())
    }

    // -- Topology API --

    /// Adds `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if `child` already has a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );

        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            // Walk to last child.
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
        }
    }

    /// Points a node's `return` link at `parent` without touching any child
    /// list.
    ///
    /// Used for in-progress nodes that navigate to an in-progress parent while
    /// still sharing children with their committed counterpart.
    pub fn set_return(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.validate(id);
        self.parent[id.idx as usize] = match parent {
            Some(p) => {
                self.validate(p);
                p.idx
            }
            None => INVALID,
        };
    }

    /// Returns the parent-in-progress of a node, if any.
    #[must_use]
    pub fn return_node(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.link(self.parent[id.idx as usize])
    }

    /// Returns the first child of a node, if any.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.link(self.first_child[id.idx as usize])
    }

    /// Returns an iterator over the direct children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns an iterator over `id` and its return chain up to the root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        self.validate(id);
        Ancestors::new(self, id.idx)
    }

    /// Returns the other tree generation's counterpart, if any.
    #[must_use]
    pub fn alternate(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.link(self.alternate[id.idx as usize])
    }

    /// Links two nodes as each other's counterpart in the other generation.
    pub fn link_alternates(&mut self, a: NodeId, b: NodeId) {
        self.validate(a);
        self.validate(b);
        self.alternate[a.idx as usize] = b.idx;
        self.alternate[b.idx as usize] = a.idx;
    }

    /// Creates (or recycles) the in-progress counterpart of `current`.
    ///
    /// The counterpart starts as a copy of `current` with cleared flags and
    /// shares its children, the way a pass begins before a node is visited.
    /// Its `return` link is copied; the evaluator re-points it with
    /// [`set_return`](Self::set_return) as it descends.
    pub fn create_work_in_progress(&mut self, current: NodeId) -> NodeId {
        self.validate(current);
        let c = current.idx as usize;
        let wip = match self.link(self.alternate[c]) {
            Some(wip) => wip,
            None => {
                let wip = self.create_node(self.kind[c], self.mode[c]);
                self.link_alternates(current, wip);
                wip
            }
        };
        let w = wip.idx as usize;
        self.kind[w] = self.kind[c];
        self.mode[w] = self.mode[c];
        self.component[w] = self.component[c];
        self.flags[w] = NodeFlags::empty();
        self.lanes[w] = self.lanes[c];
        self.child_lanes[w] = self.child_lanes[c];
        self.updates[w] = self.updates[c].clone();
        self.pending_props[w] = self.memoized_props[c].clone();
        self.memoized_props[w] = self.memoized_props[c].clone();
        self.memoized_state[w] = self.memoized_state[c].clone();
        self.suspense[w] = self.suspense[c].clone();
        self.provides[w] = self.provides[c];
        self.dependencies[w] = self.dependencies[c].clone();
        self.parent[w] = self.parent[c];
        self.first_child[w] = self.first_child[c];
        self.next_sibling[w] = self.next_sibling[c];
        wip
    }

    // -- Identity getters/setters --

    /// Returns the kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.validate(id);
        self.kind[id.idx as usize]
    }

    /// Changes the kind of a node.
    pub fn set_kind(&mut self, id: NodeId, kind: NodeKind) {
        self.validate(id);
        self.kind[id.idx as usize] = kind;
    }

    /// Returns the evaluation mode of a node.
    #[must_use]
    pub fn mode(&self, id: NodeId) -> Mode {
        self.validate(id);
        self.mode[id.idx as usize]
    }

    // -- Work getters/setters --

    /// Returns the flags of a node.
    #[must_use]
    pub fn flags(&self, id: NodeId) -> NodeFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Returns whether the node has every bit in `flags`.
    #[must_use]
    pub fn has_flags(&self, id: NodeId, flags: NodeFlags) -> bool {
        self.flags(id).contains(flags)
    }

    /// Adds bits to a node's flags.
    pub fn insert_flags(&mut self, id: NodeId, flags: NodeFlags) {
        self.validate(id);
        self.flags[id.idx as usize].insert(flags);
    }

    /// Clears bits from a node's flags.
    pub fn remove_flags(&mut self, id: NodeId, flags: NodeFlags) {
        self.validate(id);
        self.flags[id.idx as usize].remove(flags);
    }

    /// Returns the lanes with outstanding work on this node.
    #[must_use]
    pub fn lanes(&self, id: NodeId) -> Lanes {
        self.validate(id);
        self.lanes[id.idx as usize]
    }

    /// Replaces a node's lanes.
    pub fn set_lanes(&mut self, id: NodeId, lanes: Lanes) {
        self.validate(id);
        self.lanes[id.idx as usize] = lanes;
    }

    /// Adds lanes to a node.
    pub fn merge_lanes(&mut self, id: NodeId, lanes: Lanes) {
        self.validate(id);
        self.lanes[id.idx as usize] |= lanes;
    }

    /// Returns the lanes with outstanding work somewhere below this node.
    #[must_use]
    pub fn child_lanes(&self, id: NodeId) -> Lanes {
        self.validate(id);
        self.child_lanes[id.idx as usize]
    }

    /// Adds lanes to a node's subtree summary.
    pub fn merge_child_lanes(&mut self, id: NodeId, lanes: Lanes) {
        self.validate(id);
        self.child_lanes[id.idx as usize] |= lanes;
    }

    /// Returns the node's update queue.
    #[must_use]
    pub fn updates(&self, id: NodeId) -> &UpdateQueue {
        self.validate(id);
        &self.updates[id.idx as usize]
    }

    /// Replaces the node's update queue.
    pub fn set_updates(&mut self, id: NodeId, queue: UpdateQueue) {
        self.validate(id);
        self.updates[id.idx as usize] = queue;
    }

    // -- Memoized data --

    /// Returns the props the node is about to render with.
    #[must_use]
    pub fn pending_props(&self, id: NodeId) -> &Props {
        self.validate(id);
        &self.pending_props[id.idx as usize]
    }

    /// Sets the props the node is about to render with.
    pub fn set_pending_props(&mut self, id: NodeId, props: Props) {
        self.validate(id);
        self.pending_props[id.idx as usize] = props;
    }

    /// Returns the props the node last rendered with.
    #[must_use]
    pub fn memoized_props(&self, id: NodeId) -> &Props {
        self.validate(id);
        &self.memoized_props[id.idx as usize]
    }

    /// Sets the props the node last rendered with.
    pub fn set_memoized_props(&mut self, id: NodeId, props: Props) {
        self.validate(id);
        self.memoized_props[id.idx as usize] = props;
    }

    /// Returns the node's memoized state.
    #[must_use]
    pub fn memoized_state(&self, id: NodeId) -> Option<&Value> {
        self.validate(id);
        self.memoized_state[id.idx as usize].as_ref()
    }

    /// Sets the node's memoized state.
    pub fn set_memoized_state(&mut self, id: NodeId, state: Option<Value>) {
        self.validate(id);
        self.memoized_state[id.idx as usize] = state;
    }

    /// Returns the suspense state of a suspense node.
    #[must_use]
    pub fn suspense_state(&self, id: NodeId) -> Option<&SuspenseState> {
        self.validate(id);
        self.suspense[id.idx as usize].as_ref()
    }

    /// Returns the suspense state of a suspense node mutably.
    pub fn suspense_state_mut(&mut self, id: NodeId) -> Option<&mut SuspenseState> {
        self.validate(id);
        self.suspense[id.idx as usize].as_mut()
    }

    /// Returns the context a provider node supplies.
    #[must_use]
    pub fn provided_context(&self, id: NodeId) -> Option<ProvidedContext> {
        self.validate(id);
        self.provides[id.idx as usize]
    }

    /// Sets the context a provider node supplies.
    pub fn set_provided_context(&mut self, id: NodeId, provided: Option<ProvidedContext>) {
        self.validate(id);
        self.provides[id.idx as usize] = provided;
    }

    /// Returns the contexts a node read during its last render.
    #[must_use]
    pub fn dependencies(&self, id: NodeId) -> &[ContextId] {
        self.validate(id);
        &self.dependencies[id.idx as usize]
    }

    /// Records that a node reads `context`.
    pub fn add_dependency(&mut self, id: NodeId, context: ContextId) {
        self.validate(id);
        let deps = &mut self.dependencies[id.idx as usize];
        if !deps.contains(&context) {
            deps.push(context);
        }
    }

    // -- Internal helpers --

    /// Builds a handle for a live slot index.
    pub(crate) fn id_at(&self, idx: u32) -> NodeId {
        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    fn link(&self, idx: u32) -> Option<NodeId> {
        (idx != INVALID).then(|| self.id_at(idx))
    }

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: NodeId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Removes `idx` from its parent's child list.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        if self.first_child[p as usize] == idx {
            self.first_child[p as usize] = self.next_sibling[idx as usize];
        } else {
            let mut prev = self.first_child[p as usize];
            while prev != INVALID && self.next_sibling[prev as usize] != idx {
                prev = self.next_sibling[prev as usize];
            }
            if prev != INVALID {
                self.next_sibling[prev as usize] = self.next_sibling[idx as usize];
            }
        }
        self.parent[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}
