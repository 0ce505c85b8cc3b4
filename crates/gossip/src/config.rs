// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

/// Timing and fan-out knobs for the SWIM protocol (spec §4.7).
#[derive(Debug, Clone, Copy)]
pub struct GossipConfig {
    pub gossip_period_ms: u64,
    pub probe_timeout_ms: u64,
    pub suspect_timeout_ms: u64,
    pub indirect_probe_count: usize,
    pub piggyback_count: usize,
}

impl Default for GossipConfig {
    fn default() -> Self {
        Self {
            gossip_period_ms: 1_000,
            probe_timeout_ms: 200,
            suspect_timeout_ms: 5_000,
            indirect_probe_count: 3,
            piggyback_count: 6,
        }
    }
}
