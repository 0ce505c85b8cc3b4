// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An immutable consistent hash ring (spec §4.6): a sorted array of
//! `(hash, node_id)` pairs, `virtual_nodes_per_node` copies per member.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use wren_core::NodeId;

#[derive(Debug, Clone)]
pub struct Ring {
    points: Vec<(u64, NodeId)>,
    virtual_nodes_per_node: u32,
}

impl Ring {
    /// Builds a ring over `members`, hashing `virtual_nodes_per_node`
    /// distinct labels per node id so each member claims roughly an equal
    /// share of the key space.
    pub fn build(members: &[NodeId], virtual_nodes_per_node: u32) -> Self {
        let mut points: Vec<(u64, NodeId)> = Vec::with_capacity(members.len() * virtual_nodes_per_node as usize);
        for node_id in members {
            for replica in 0..virtual_nodes_per_node {
                points.push((hash_label(node_id.as_str(), replica), *node_id));
            }
        }
        points.sort_unstable_by_key(|(hash, _)| *hash);
        Self {
            points,
            virtual_nodes_per_node,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn virtual_nodes_per_node(&self) -> u32 {
        self.virtual_nodes_per_node
    }

    /// Returns the node owning `key`: the first ring position at or past
    /// `hash(key)`, wrapping to the start of the ring.
    pub fn get_node(&self, key: &str) -> Option<NodeId> {
        if self.points.is_empty() {
            return None;
        }
        let hash = hash_key(key);
        let idx = self.points.partition_point(|(h, _)| *h < hash);
        let idx = if idx == self.points.len() { 0 } else { idx };
        Some(self.points[idx].1)
    }
}

fn hash_label(node_id: &str, replica: u32) -> u64 {
    let mut hasher = DefaultHasher::new();
    node_id.hash(&mut hasher);
    replica.hash(&mut hasher);
    hasher.finish()
}

fn hash_key(key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
#[path = "ring_tests.rs"]
mod tests;
