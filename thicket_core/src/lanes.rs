// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Priority lanes.
//!
//! A *lane* is a single bit in a 31-bit mask; a [`Lanes`] value is any
//! combination of them. Lower bits are more urgent: [`Lanes::SYNC`] is the
//! highest priority the scheduler knows about. The unwind handlers only need a
//! handful of operations on top of the raw mask, so this stays a thin value
//! type.

use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

/// A set of scheduling priorities encoded as a bitmask.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Lanes(pub u32);

impl Lanes {
    /// The empty set.
    pub const NONE: Self = Self(0);
    /// Highest synchronous priority.
    pub const SYNC: Self = Self(0b0000_0000_0000_0000_0000_0000_0000_0001);
    /// Continuous input (drag, scroll).
    pub const INPUT_CONTINUOUS: Self = Self(0b0000_0000_0000_0000_0000_0000_0000_0100);
    /// Default priority for updates outside of an event.
    pub const DEFAULT: Self = Self(0b0000_0000_0000_0000_0000_0000_0001_0000);
    /// All transition lanes.
    pub const TRANSITIONS: Self = Self(0b0000_0000_0011_1111_1111_1111_1100_0000);
    /// All retry lanes, used to re-render boundaries after they unsuspend.
    pub const RETRIES: Self = Self(0b0000_0111_1100_0000_0000_0000_0000_0000);
    /// Idle work.
    pub const IDLE: Self = Self(0b0010_0000_0000_0000_0000_0000_0000_0000);
    /// Work for hidden subtrees.
    pub const OFFSCREEN: Self = Self(0b0100_0000_0000_0000_0000_0000_0000_0000);

    /// Returns whether no lane is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the union of `self` and `other`.
    #[inline]
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns `self` with every lane in `other` cleared.
    #[inline]
    #[must_use]
    pub const fn remove(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Returns the lanes present in both sets.
    #[inline]
    #[must_use]
    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Returns whether `self` and `subset` share at least one lane.
    #[inline]
    #[must_use]
    pub const fn includes_some(self, subset: Self) -> bool {
        self.0 & subset.0 != 0
    }

    /// Returns whether every lane of `self` is also in `set`.
    #[inline]
    #[must_use]
    pub const fn is_subset_of(self, set: Self) -> bool {
        self.0 & set.0 == self.0
    }

    /// Picks a single representative lane: the numerically lowest set bit.
    ///
    /// Returns [`Lanes::NONE`] for the empty set.
    #[inline]
    #[must_use]
    pub const fn pick_one(self) -> Self {
        Self(self.0 & self.0.wrapping_neg())
    }

    /// Returns whether this value is exactly one lane.
    #[inline]
    #[must_use]
    pub const fn is_single(self) -> bool {
        self.0 != 0 && self.0 & (self.0 - 1) == 0
    }

    /// Iterates over the individual lanes, lowest first.
    pub fn iter(self) -> impl Iterator<Item = Self> {
        let mut rest = self;
        core::iter::from_fn(move || {
            if rest.is_empty() {
                return None;
            }
            let lane = rest.pick_one();
            rest = rest.remove(lane);
            Some(lane)
        })
    }
}

impl BitOr for Lanes {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        self.merge(rhs)
    }
}

impl BitOrAssign for Lanes {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.merge(rhs);
    }
}

impl BitAnd for Lanes {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        self.intersect(rhs)
    }
}

impl BitAndAssign for Lanes {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        *self = self.intersect(rhs);
    }
}

impl fmt::Debug for Lanes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lanes({:#b})", self.0)
    }
}
