// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render root.
//!
//! A [`Root`] owns the [`NodeStore`] holding both tree generations, the
//! outstanding-work lanes the scheduler reads, and the ping cache that keeps
//! resume listeners deduplicated per wakeable and lane combination.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::lanes::Lanes;
use crate::node::{NodeId, NodeStore, Value};
use crate::wakeable::{Wakeable, WakeableKey};

/// State of the root node: the element tree it renders.
///
/// The root-level error update replaces it with `element: None`, which
/// unmounts everything.
#[derive(Clone, Debug, Default)]
pub struct RootState {
    /// The top-level element, or `None` for empty output.
    pub element: Option<Value>,
}

/// Lanes with outstanding work, shared with every [`Ping`](crate::wakeable::Ping)
/// registered against the root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutstandingWork {
    /// Lanes that still need to be rendered.
    pub pending: Lanes,
    /// Lanes whose last render suspended.
    pub suspended: Lanes,
    /// Suspended lanes whose wakeables have since settled.
    pub pinged: Lanes,
}

impl OutstandingWork {
    pub(crate) fn ping(&mut self, lanes: Lanes) {
        self.pinged |= self.suspended & lanes;
        self.pending |= lanes;
    }
}

struct PingEntry {
    wakeable: Weak<dyn Wakeable>,
    lanes: SmallVec<[Lanes; 2]>,
}

impl PingEntry {
    fn is_for(&self, wakeable: &Rc<dyn Wakeable>) -> bool {
        self.wakeable.strong_count() > 0
            && core::ptr::addr_eq(self.wakeable.as_ptr(), Rc::as_ptr(wakeable))
    }
}

/// Lane combinations that already have a resume listener, per wakeable.
///
/// Wakeables are held weakly; entries for dropped wakeables are pruned when
/// new entries are added.
#[derive(Default)]
pub(crate) struct PingCache {
    entries: HashMap<WakeableKey, PingEntry>,
}

impl PingCache {
    /// Records `lanes` for `wakeable`. Returns `false` if that combination
    /// was already recorded.
    pub(crate) fn insert(&mut self, wakeable: &Rc<dyn Wakeable>, lanes: Lanes) -> bool {
        let key = WakeableKey::of(wakeable);
        let fresh = !self
            .entries
            .get(&key)
            .is_some_and(|entry| entry.is_for(wakeable));
        if fresh {
            self.prune();
            self.entries.insert(
                key,
                PingEntry {
                    wakeable: Rc::downgrade(wakeable),
                    lanes: SmallVec::new(),
                },
            );
        }
        let Some(entry) = self.entries.get_mut(&key) else {
            return false;
        };
        if entry.lanes.contains(&lanes) {
            return false;
        }
        entry.lanes.push(lanes);
        true
    }

    fn lanes(&self, wakeable: &Rc<dyn Wakeable>) -> &[Lanes] {
        match self.entries.get(&WakeableKey::of(wakeable)) {
            Some(entry) if entry.is_for(wakeable) => &entry.lanes,
            _ => &[],
        }
    }

    fn prune(&mut self) {
        self.entries.retain(|_, entry| entry.wakeable.strong_count() > 0);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A render root and the state it carries between passes.
pub struct Root {
    pub(crate) tree: NodeStore,
    node: NodeId,
    work: Rc<RefCell<OutstandingWork>>,
    pub(crate) ping_cache: Option<PingCache>,
    pub(crate) failed_legacy_boundaries: HashSet<NodeId>,
    pub(crate) failed_boundaries_for_refresh: Vec<NodeId>,
}

impl Root {
    /// Creates a root over `tree` whose current root node is `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a [`NodeKind::Root`](crate::node::NodeKind::Root).
    #[must_use]
    pub fn new(tree: NodeStore, node: NodeId) -> Self {
        assert_eq!(
            tree.kind(node),
            crate::node::NodeKind::Root,
            "root must wrap a Root node"
        );
        Self {
            tree,
            node,
            work: Rc::new(RefCell::new(OutstandingWork::default())),
            ping_cache: None,
            failed_legacy_boundaries: HashSet::new(),
            failed_boundaries_for_refresh: Vec::new(),
        }
    }

    /// Returns the node store.
    #[must_use]
    pub fn tree(&self) -> &NodeStore {
        &self.tree
    }

    /// Returns the node store mutably.
    pub fn tree_mut(&mut self) -> &mut NodeStore {
        &mut self.tree
    }

    /// Returns the current (committed) root node.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Makes `node` the committed root node, e.g. after a commit swaps the
    /// tree generations.
    pub fn set_node(&mut self, node: NodeId) {
        self.node = node;
    }

    /// Returns a snapshot of the outstanding work.
    #[must_use]
    pub fn outstanding(&self) -> OutstandingWork {
        *self.work.borrow()
    }

    /// Lanes that still need to be rendered.
    #[must_use]
    pub fn pending_lanes(&self) -> Lanes {
        self.work.borrow().pending
    }

    /// Adds `lanes` to the pending work.
    pub fn mark_pending(&mut self, lanes: Lanes) {
        self.work.borrow_mut().pending |= lanes;
    }

    /// Records that a render at `lanes` suspended.
    ///
    /// The lanes leave the pending set until a ping re-admits them.
    pub fn mark_suspended(&mut self, lanes: Lanes) {
        let mut work = self.work.borrow_mut();
        work.suspended |= lanes;
        work.pinged = work.pinged.remove(lanes);
        work.pending = work.pending.remove(lanes);
    }

    /// Removes `lanes` from every outstanding set after they committed.
    pub fn mark_finished(&mut self, lanes: Lanes) {
        let mut work = self.work.borrow_mut();
        work.pending = work.pending.remove(lanes);
        work.suspended = work.suspended.remove(lanes);
        work.pinged = work.pinged.remove(lanes);
    }

    /// Lane combinations with a registered resume listener for `wakeable`.
    #[must_use]
    pub fn ping_lanes(&self, wakeable: &Rc<dyn Wakeable>) -> &[Lanes] {
        self.ping_cache
            .as_ref()
            .map_or(&[], |cache| cache.lanes(wakeable))
    }

    /// Returns whether the ping cache has been created.
    #[must_use]
    pub fn has_ping_cache(&self) -> bool {
        self.ping_cache.is_some()
    }

    /// Drops cache entries for wakeables that no longer exist. Returns the
    /// number of entries left.
    pub fn prune_ping_cache(&mut self) -> usize {
        self.ping_cache.as_mut().map_or(0, |cache| {
            cache.prune();
            cache.len()
        })
    }

    /// Returns whether the boundary instance behind `node` already failed as
    /// a handler-only error boundary in this batch.
    ///
    /// Both tree generations of a boundary share one instance, so a mark on
    /// either counterpart applies.
    #[must_use]
    pub fn is_failed_legacy_boundary(&self, node: NodeId) -> bool {
        self.failed_legacy_boundaries.contains(&node)
            || self
                .tree
                .alternate(node)
                .is_some_and(|alt| self.failed_legacy_boundaries.contains(&alt))
    }

    /// Forgets boundaries that failed in the previous batch. The scheduler
    /// calls this once a commit completes.
    pub fn clear_failed_legacy_boundaries(&mut self) {
        self.failed_legacy_boundaries.clear();
    }

    /// Boundaries that captured an error since the last call, for hot-reload
    /// bookkeeping.
    pub fn take_failed_boundaries_for_refresh(&mut self) -> Vec<NodeId> {
        core::mem::take(&mut self.failed_boundaries_for_refresh)
    }

    pub(crate) fn work_handle(&self) -> Weak<RefCell<OutstandingWork>> {
        Rc::downgrade(&self.work)
    }

    /// Splits the root into its tree and its outstanding-work cell.
    pub(crate) fn tree_and_work(&mut self) -> (&mut NodeStore, &RefCell<OutstandingWork>) {
        (&mut self.tree, &*self.work)
    }
}

impl fmt::Debug for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Root")
            .field("node", &self.node)
            .field("outstanding", &*self.work.borrow())
            .field(
                "ping_cache_len",
                &self.ping_cache.as_ref().map(PingCache::len),
            )
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Mode, NodeKind};
    use crate::testing::ManualWakeable;

    fn root() -> Root {
        let mut store = NodeStore::new();
        let node = store.create_node(NodeKind::Root, Mode::CONCURRENT);
        Root::new(store, node)
    }

    #[test]
    fn ping_cache_dedups_lane_sets() {
        let mut cache = PingCache::default();
        let w: Rc<dyn Wakeable> = Rc::new(ManualWakeable::default());
        assert!(cache.insert(&w, Lanes::DEFAULT));
        assert!(!cache.insert(&w, Lanes::DEFAULT));
        assert!(cache.insert(&w, Lanes::SYNC));
        assert_eq!(cache.lanes(&w), &[Lanes::DEFAULT, Lanes::SYNC]);
    }

    #[test]
    fn ping_cache_prunes_dropped_wakeables() {
        let mut cache = PingCache::default();
        let dropped: Rc<dyn Wakeable> = Rc::new(ManualWakeable::default());
        assert!(cache.insert(&dropped, Lanes::DEFAULT));
        drop(dropped);

        let live: Rc<dyn Wakeable> = Rc::new(ManualWakeable::default());
        assert!(cache.insert(&live, Lanes::DEFAULT));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn suspended_lanes_leave_pending_until_pinged() {
        let mut root = root();
        root.mark_pending(Lanes::DEFAULT | Lanes::SYNC);
        root.mark_suspended(Lanes::DEFAULT);
        assert_eq!(root.pending_lanes(), Lanes::SYNC);

        root.work.borrow_mut().ping(Lanes::DEFAULT);
        let work = root.outstanding();
        assert_eq!(work.pending, Lanes::DEFAULT | Lanes::SYNC);
        assert_eq!(work.pinged, Lanes::DEFAULT);

        root.mark_finished(Lanes::DEFAULT);
        assert_eq!(root.outstanding().suspended, Lanes::NONE);
    }

    #[test]
    #[should_panic(expected = "root must wrap a Root node")]
    fn root_requires_root_node() {
        let mut store = NodeStore::new();
        let node = store.create_node(NodeKind::Host, Mode::CONCURRENT);
        let _ = Root::new(store, node);
    }
}
