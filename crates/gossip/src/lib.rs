// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wren-gossip: SWIM-style failure detection and membership dissemination
//! (spec §4.7), driving `wren-membership`'s table and `wren-ring`'s
//! rebuild-on-change subscriber.

mod config;
mod error;
mod swim;

pub use config::GossipConfig;
pub use error::GossipError;
pub use swim::Swim;
