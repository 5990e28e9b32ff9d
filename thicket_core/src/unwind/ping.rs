// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;

use crate::lanes::Lanes;
use crate::pass::RenderPass;
use crate::root::{PingCache, Root};
use crate::trace::RestoreUpdatersEvent;
use crate::wakeable::{Ping, Wakeable, WakeableKey};

/// Registers a resume listener on `wakeable` that re-admits `lanes` into the
/// root's outstanding work once it settles.
///
/// At most one listener is registered per wakeable and lane combination;
/// repeated calls for the same pair do nothing. Returns whether a listener
/// was registered.
pub fn attach_ping_listener(
    root: &mut Root,
    pass: &mut RenderPass<'_>,
    wakeable: &Rc<dyn Wakeable>,
    lanes: Lanes,
) -> bool {
    let cache = root.ping_cache.get_or_insert_with(PingCache::default);
    if !cache.insert(wakeable, lanes) {
        return false;
    }

    if pass.config().updater_tracking {
        pass.tracer().restore_updaters(&RestoreUpdatersEvent {
            root: root.node(),
            lanes,
        });
    }
    wakeable.on_settle(Ping::new(root.work_handle(), WakeableKey::of(wakeable), lanes));
    true
}
