// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `NodeConfig`: TOML-loaded node configuration.
//! Every field has a serde default so a minimal file — or none, in tests —
//! is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub node_id: Option<String>,
    pub bind_addr: String,
    pub data_dir: PathBuf,
    pub seeds: Vec<String>,
    pub gossip_period_ms: u64,
    pub probe_timeout_ms: u64,
    pub suspect_timeout_ms: u64,
    pub virtual_nodes_per_node: u32,
    pub max_concurrent_workflows: usize,
    pub rpc_timeout_ms: u64,
    pub timer_poll_interval_ms: u64,
    pub timer_batch_limit: usize,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            node_id: None,
            bind_addr: "127.0.0.1:7420".to_string(),
            data_dir: PathBuf::from(".wren"),
            seeds: Vec::new(),
            gossip_period_ms: 1_000,
            probe_timeout_ms: 200,
            suspect_timeout_ms: 5_000,
            virtual_nodes_per_node: 128,
            max_concurrent_workflows: 100,
            rpc_timeout_ms: 5_000,
            timer_poll_interval_ms: 250,
            timer_batch_limit: 100,
        }
    }
}

impl NodeConfig {
    /// Loads config from a TOML file, falling back to defaults for every
    /// field the file omits. Unknown keys are ignored for forward
    /// compatibility.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
