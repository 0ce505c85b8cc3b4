// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Membership`: the in-memory `map<node_id, NodeInfo>`.
//!
//! Reader-many / writer-one: a `parking_lot::RwLock` guards the table.

use std::collections::HashMap;

use parking_lot::RwLock;
use wren_core::NodeId;

use crate::node_info::{NodeInfo, NodeState};

/// A node's membership table. One instance per cluster node; `local_id`
/// names the entry this process owns, for self-refutation on `update`.
pub struct Membership {
    local_id: NodeId,
    nodes: RwLock<HashMap<NodeId, NodeInfo>>,
}

impl Membership {
    pub fn new(local: NodeInfo) -> Self {
        let local_id = local.node_id;
        let mut nodes = HashMap::new();
        nodes.insert(local_id, local);
        Self {
            local_id,
            nodes: RwLock::new(nodes),
        }
    }

    pub fn local_id(&self) -> NodeId {
        self.local_id
    }

    /// Every known node, in no particular order.
    pub fn all(&self) -> Vec<NodeInfo> {
        self.nodes.read().values().cloned().collect()
    }

    /// Nodes currently believed `Alive`.
    pub fn alive(&self) -> Vec<NodeInfo> {
        self.nodes
            .read()
            .values()
            .filter(|n| n.state == NodeState::Alive)
            .cloned()
            .collect()
    }

    pub fn get(&self, node_id: &NodeId) -> Option<NodeInfo> {
        self.nodes.read().get(node_id).cloned()
    }

    /// Merges `incoming` into the table per the supersession rule (spec
    /// §4.5). Returns `true` if the table changed. Self-refutation: if
    /// `incoming` names the local node as `Suspect` (or worse) and would
    /// otherwise supersede the local entry, the local node instead bumps
    /// its own incarnation and re-asserts `Alive`, overriding the merge.
    pub fn update(&self, incoming: NodeInfo) -> bool {
        if incoming.node_id == self.local_id && incoming.state != NodeState::Alive {
            let mut nodes = self.nodes.write();
            let local = nodes.get(&self.local_id).cloned();
            let Some(local) = local else {
                return false;
            };
            if incoming.supersedes(&local) {
                let refuted = NodeInfo {
                    node_id: self.local_id,
                    address: local.address.clone(),
                    state: NodeState::Alive,
                    incarnation: incoming.incarnation + 1,
                    last_heartbeat_ms: local.last_heartbeat_ms,
                };
                tracing::warn!(
                    node_id = %self.local_id,
                    incarnation = refuted.incarnation,
                    "self-refuting suspicion, bumping incarnation"
                );
                nodes.insert(self.local_id, refuted);
                return true;
            }
            return false;
        }

        let mut nodes = self.nodes.write();
        match nodes.get(&incoming.node_id) {
            Some(current) if !incoming.supersedes(current) => false,
            _ => {
                nodes.insert(incoming.node_id, incoming);
                true
            }
        }
    }
}

#[cfg(test)]
#[path = "membership_tests.rs"]
mod tests;
