// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wren-node: a single addressable cluster member (spec §6.3 operator
//! surface), wiring `wren-storage`/`wren-runtime` for local execution,
//! `wren-membership`/`wren-ring`/`wren-gossip` for cluster membership and
//! routing, and `wren-transport` for the wire.

mod config;
mod error;
mod logging;
mod node;
mod stats;
mod timer_worker;

pub use config::{ConfigError, NodeConfig};
pub use error::NodeError;
pub use node::{Node, WorkflowStatusView};
pub use stats::RuntimeStats;
pub use timer_worker::TimerWorker;

pub use logging::init as init_logging;
