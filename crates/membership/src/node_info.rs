// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gossiped node state (spec §4.5, §4.7).

use serde::{Deserialize, Serialize};
use wren_core::NodeId;

/// A node's failure-detector state, ordered `Alive < Suspect < Dead` for the
/// merge rule in [`NodeInfo::supersedes`] — except that an `Alive` at a
/// strictly higher incarnation always wins over any state at a lower one
/// (self-refutation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeState {
    Alive,
    Suspect,
    Dead,
}

/// One node's membership record as carried in gossip piggyback payloads and
/// the local membership table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub node_id: NodeId,
    pub address: String,
    pub state: NodeState,
    pub incarnation: u64,
    pub last_heartbeat_ms: u64,
}

impl NodeInfo {
    pub fn new(node_id: NodeId, address: impl Into<String>) -> Self {
        Self {
            node_id,
            address: address.into(),
            state: NodeState::Alive,
            incarnation: 0,
            last_heartbeat_ms: 0,
        }
    }

    /// True iff `self` should replace `other` in the membership table: a
    /// strictly greater `(incarnation, state_rank)` pair, with `Alive`
    /// breaking ties at a higher incarnation regardless of `other`'s state
    /// (spec §4.5 self-refutation clause).
    pub fn supersedes(&self, other: &NodeInfo) -> bool {
        if self.incarnation > other.incarnation {
            return true;
        }
        if self.incarnation < other.incarnation {
            return false;
        }
        self.state > other.state
    }
}

#[cfg(test)]
#[path = "node_info_tests.rs"]
mod tests;
