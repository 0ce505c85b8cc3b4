// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `RuntimeStats` (spec §4.3 ambient observability): plain counters rebuilt
//! on demand from the status index and membership table, not persisted.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RuntimeStats {
    pub workflows_running: u64,
    pub workflows_completed: u64,
    pub workflows_failed: u64,
    pub workflows_cancelled: u64,
    pub journal_entries_appended: u64,
    pub timers_pending: u64,
    pub gossip_rounds: u64,
    pub known_nodes: u64,
}

/// Counters a node bumps as it runs, for the fields no storage query can
/// cheaply answer (gossip rounds completed, timers fired this process).
#[derive(Default)]
pub struct StatCounters {
    gossip_rounds: AtomicU64,
    timer_fires: AtomicU64,
}

impl StatCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_gossip_round(&self) {
        self.gossip_rounds.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_timer_fire(&self) {
        self.timer_fires.fetch_add(1, Ordering::Relaxed);
    }

    pub fn gossip_rounds(&self) -> u64 {
        self.gossip_rounds.load(Ordering::Relaxed)
    }

    pub fn timer_fires(&self) -> u64 {
        self.timer_fires.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
