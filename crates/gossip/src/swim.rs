// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The SWIM-style probe/suspicion/dissemination state machine (spec §4.7).

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::seq::SliceRandom;
use wren_core::{Clock, NodeId};
use wren_membership::{Membership, NodeInfo, NodeState};
use wren_ring::RingHandle;
use wren_transport::{ClusterTransport, Request, Response};

use crate::config::GossipConfig;
use crate::error::GossipError;

pub struct Swim<T: ClusterTransport, C: Clock> {
    local_id: NodeId,
    membership: Arc<Membership>,
    ring: Arc<RingHandle>,
    transport: Arc<T>,
    clock: C,
    config: GossipConfig,
    recent_deltas: Mutex<VecDeque<NodeInfo>>,
}

impl<T: ClusterTransport + 'static, C: Clock + 'static> Swim<T, C> {
    pub fn new(
        membership: Arc<Membership>,
        ring: Arc<RingHandle>,
        transport: Arc<T>,
        clock: C,
        config: GossipConfig,
    ) -> Self {
        let local_id = membership.local_id();
        Self {
            local_id,
            membership,
            ring,
            transport,
            clock,
            config,
            recent_deltas: Mutex::new(VecDeque::new()),
        }
    }

    pub fn membership(&self) -> &Membership {
        &self.membership
    }

    /// Contacts `seeds` in order until one answers `Join`, then merges the
    /// returned snapshot (spec §4.7 `join()`).
    pub async fn join(&self, seeds: &[String]) -> Result<(), GossipError> {
        // Membership::new seeds the table with the local node; this never misses.
        let local_info = self
            .membership
            .get(&self.local_id)
            .unwrap_or_else(|| NodeInfo::new(self.local_id, String::new()));
        for seed in seeds {
            let req = Request::Join { node_info: local_info.clone() };
            match self.transport.send(seed, req).await {
                Ok(Response::Join { members }) => {
                    for member in members {
                        self.apply_update(member);
                    }
                    return Ok(());
                }
                _ => continue,
            }
        }
        Err(GossipError::JoinFailed)
    }

    /// Handles an inbound gossip request. Returns `None` for request kinds
    /// this protocol does not own (remote-executor requests), so a node's
    /// router can fall through to the workflow RPC handler.
    pub async fn handle_request(&self, request: Request) -> Option<Response> {
        match request {
            Request::Ping { piggyback, .. } => {
                for info in piggyback {
                    self.apply_update(info);
                }
                Some(Response::Ping { piggyback: self.sample_piggyback() })
            }
            Request::PingReq { target_node, .. } => {
                let ack = match self.membership.get(&target_node) {
                    Some(target) => self.probe_address(&target.address).await,
                    None => false,
                };
                Some(Response::PingReq { ack, piggyback: self.sample_piggyback() })
            }
            Request::Join { node_info } => {
                self.apply_update(node_info);
                Some(Response::Join { members: self.membership.all() })
            }
            _ => None,
        }
    }

    /// One probe round: picks a random peer, direct-pings it, falls back to
    /// indirect probing through `indirect_probe_count` peers, and marks the
    /// target `Suspect` if none of them get an ack (spec §4.7 steps 1-2).
    pub async fn probe_once(&self) {
        let Some(target) = self.pick_random_peer() else {
            return;
        };
        if self.probe_address(&target.address).await {
            return;
        }

        let helpers = self.pick_random_peers(self.config.indirect_probe_count, &[target.node_id]);
        let mut acked = false;
        for helper in helpers {
            let req = Request::PingReq { from_node: self.local_id, target_node: target.node_id };
            if let Ok(Response::PingReq { ack: true, piggyback }) =
                self.transport.send(&helper.address, req).await
            {
                for info in piggyback {
                    self.apply_update(info);
                }
                acked = true;
                break;
            }
        }

        if !acked {
            self.mark_suspect(target.node_id);
        }
    }

    /// Sweeps the table for `Suspect` nodes whose window has expired (spec
    /// §4.7 step 3) and runs one probe round.
    pub async fn tick(&self) {
        self.sweep_expired_suspects();
        self.probe_once().await;
    }

    /// Runs `tick` every `gossip_period_ms` until the task is dropped.
    /// Intended to be spawned once by the owning node.
    pub async fn run(self: Arc<Self>) {
        let period = Duration::from_millis(self.config.gossip_period_ms);
        loop {
            tokio::time::sleep(period).await;
            self.tick().await;
        }
    }

    async fn probe_address(&self, address: &str) -> bool {
        let req = Request::Ping {
            from_node: self.local_id,
            incarnation: self
                .membership
                .get(&self.local_id)
                .map(|n| n.incarnation)
                .unwrap_or(0),
            piggyback: self.sample_piggyback(),
        };
        let timeout = Duration::from_millis(self.config.probe_timeout_ms);
        match tokio::time::timeout(timeout, self.transport.send(address, req)).await {
            Ok(Ok(Response::Ping { piggyback })) => {
                for info in piggyback {
                    self.apply_update(info);
                }
                true
            }
            _ => false,
        }
    }

    fn mark_suspect(&self, target: NodeId) {
        let Some(mut info) = self.membership.get(&target) else {
            return;
        };
        if info.state != NodeState::Alive {
            return;
        }
        info.state = NodeState::Suspect;
        info.last_heartbeat_ms = self.clock.epoch_ms();
        tracing::info!(node_id = %target, "marking peer suspect");
        self.apply_update(info);
    }

    fn sweep_expired_suspects(&self) {
        let now = self.clock.epoch_ms();
        for node in self.membership.all() {
            if node.state == NodeState::Suspect
                && now.saturating_sub(node.last_heartbeat_ms) > self.config.suspect_timeout_ms
            {
                tracing::info!(node_id = %node.node_id, "suspicion expired, marking dead");
                self.apply_update(NodeInfo {
                    last_heartbeat_ms: now,
                    state: NodeState::Dead,
                    ..node
                });
            }
        }
    }

    fn apply_update(&self, info: NodeInfo) {
        if self.membership.update(info.clone()) {
            self.record_delta(info);
            self.ring.resync(&self.membership);
        }
    }

    fn record_delta(&self, info: NodeInfo) {
        let mut deltas = self.recent_deltas.lock();
        deltas.push_front(info);
        deltas.truncate(self.config.piggyback_count * 4);
    }

    fn sample_piggyback(&self) -> Vec<NodeInfo> {
        self.recent_deltas
            .lock()
            .iter()
            .take(self.config.piggyback_count)
            .cloned()
            .collect()
    }

    fn pick_random_peer(&self) -> Option<NodeInfo> {
        let candidates: Vec<NodeInfo> = self
            .membership
            .alive()
            .into_iter()
            .filter(|n| n.node_id != self.local_id)
            .collect();
        candidates.choose(&mut rand::thread_rng()).cloned()
    }

    fn pick_random_peers(&self, count: usize, exclude: &[NodeId]) -> Vec<NodeInfo> {
        let mut candidates: Vec<NodeInfo> = self
            .membership
            .alive()
            .into_iter()
            .filter(|n| n.node_id != self.local_id && !exclude.contains(&n.node_id))
            .collect();
        candidates.shuffle(&mut rand::thread_rng());
        candidates.truncate(count);
        candidates
    }
}

#[cfg(test)]
#[path = "swim_tests.rs"]
mod tests;
