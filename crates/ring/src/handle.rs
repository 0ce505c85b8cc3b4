// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `RingHandle`: the swap-on-write wrapper membership events publish into.
//!
//! Readers (routing decisions) take a cheap `Arc<Ring>` snapshot; a rebuild
//! replaces it atomically under the write lock so no reader ever observes a
//! torn ring (spec §5, §9 "subscriber, not back-link").

use std::sync::Arc;

use parking_lot::RwLock;
use wren_core::NodeId;
use wren_membership::Membership;

use crate::ring::Ring;

pub struct RingHandle {
    current: RwLock<Arc<Ring>>,
    virtual_nodes_per_node: u32,
}

impl RingHandle {
    pub fn new(virtual_nodes_per_node: u32) -> Self {
        Self {
            current: RwLock::new(Arc::new(Ring::build(&[], virtual_nodes_per_node))),
            virtual_nodes_per_node,
        }
    }

    /// A cheap snapshot of the ring as of the last rebuild.
    pub fn snapshot(&self) -> Arc<Ring> {
        self.current.read().clone()
    }

    pub fn get_node(&self, key: &str) -> Option<NodeId> {
        self.snapshot().get_node(key)
    }

    /// Rebuilds the ring from the full current member set and swaps it in.
    /// Called by the membership subscriber on every `Alive` add or `Dead`
    /// removal, never incrementally.
    pub fn rebuild(&self, members: &[NodeId]) {
        let ring = Ring::build(members, self.virtual_nodes_per_node);
        *self.current.write() = Arc::new(ring);
    }

    /// Rebuilds from the `Alive` set of a membership table. A thin
    /// observer: callers invoke this after every `Membership::update` that
    /// returns `true`, rather than the ring holding a reference back into
    /// membership.
    pub fn resync(&self, membership: &Membership) {
        let members: Vec<NodeId> = membership.alive().into_iter().map(|n| n.node_id).collect();
        self.rebuild(&members);
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
