// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Awaitable values a component can suspend on.
//!
//! The core never inspects what a [`Wakeable`] is waiting for. It only needs
//! to hand it a one-shot [`Ping`] and to tell two wakeables apart by identity
//! ([`WakeableKey`]).

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::lanes::Lanes;
use crate::root::OutstandingWork;

/// An unfinished asynchronous dependency.
pub trait Wakeable {
    /// Registers `ping` to fire once the value settles.
    ///
    /// Resolution and failure are handled identically: the implementation
    /// fires the ping exactly once on whichever happens first, on a later
    /// turn of the host's task queue.
    fn on_settle(&self, ping: Ping);
}

/// Identity of a [`Wakeable`], derived from its allocation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WakeableKey(usize);

impl WakeableKey {
    /// Returns the identity of `wakeable`.
    #[must_use]
    pub fn of(wakeable: &Rc<dyn Wakeable>) -> Self {
        Self(Rc::as_ptr(wakeable).cast::<()>() as usize)
    }
}

impl fmt::Debug for WakeableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WakeableKey({:#x})", self.0)
    }
}

/// One-shot notification that re-admits lanes into a root's pending work.
///
/// Holds the root weakly: firing after the root was dropped does nothing.
pub struct Ping {
    work: Weak<RefCell<OutstandingWork>>,
    key: WakeableKey,
    lanes: Lanes,
}

impl Ping {
    pub(crate) fn new(work: Weak<RefCell<OutstandingWork>>, key: WakeableKey, lanes: Lanes) -> Self {
        Self { work, key, lanes }
    }

    /// The lanes this ping re-admits.
    #[must_use]
    pub fn lanes(&self) -> Lanes {
        self.lanes
    }

    /// The wakeable this ping was registered on.
    #[must_use]
    pub fn key(&self) -> WakeableKey {
        self.key
    }

    /// Fires the ping, consuming it.
    pub fn fire(self) {
        if let Some(work) = self.work.upgrade() {
            work.borrow_mut().ping(self.lanes);
        }
    }
}

impl fmt::Debug for Ping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ping")
            .field("key", &self.key)
            .field("lanes", &self.lanes)
            .field("root_alive", &(self.work.strong_count() > 0))
            .finish()
    }
}

/// Wakeables a suspense boundary is waiting on, deduplicated by identity.
#[derive(Clone, Default)]
pub struct RetrySet {
    wakeables: Vec<Rc<dyn Wakeable>>,
}

impl RetrySet {
    /// Adds `wakeable` unless it is already present. Returns whether it was
    /// added.
    pub fn insert(&mut self, wakeable: Rc<dyn Wakeable>) -> bool {
        let key = WakeableKey::of(&wakeable);
        if self.contains(key) {
            return false;
        }
        self.wakeables.push(wakeable);
        true
    }

    /// Returns whether a wakeable with this identity is present.
    #[must_use]
    pub fn contains(&self, key: WakeableKey) -> bool {
        self.wakeables.iter().any(|w| WakeableKey::of(w) == key)
    }

    /// Number of distinct wakeables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.wakeables.len()
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wakeables.is_empty()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<dyn Wakeable>> {
        self.wakeables.iter()
    }
}

impl fmt::Debug for RetrySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.wakeables.iter().map(WakeableKey::of))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ManualWakeable;

    #[test]
    fn retry_set_dedups_by_identity() {
        let a: Rc<dyn Wakeable> = Rc::new(ManualWakeable::default());
        let b: Rc<dyn Wakeable> = Rc::new(ManualWakeable::default());
        let mut set = RetrySet::default();
        assert!(set.insert(a.clone()));
        assert!(!set.insert(a.clone()));
        assert!(set.insert(b));
        assert_eq!(set.len(), 2);
        assert!(set.contains(WakeableKey::of(&a)));
    }

    #[test]
    fn ping_without_root_is_noop() {
        let work = Rc::new(RefCell::new(OutstandingWork::default()));
        let weak = Rc::downgrade(&work);
        drop(work);
        let w: Rc<dyn Wakeable> = Rc::new(ManualWakeable::default());
        let ping = Ping::new(weak, WakeableKey::of(&w), Lanes::DEFAULT);
        ping.fire();
    }
}
