// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing initialization (spec §4.10 ambient logging), matching the
//! teacher's `tracing-subscriber` + `RUST_LOG` convention.

use tracing_subscriber::EnvFilter;

/// Installs a global `tracing` subscriber. Safe to call more than once per
/// process (later calls are no-ops) so tests can call it from every case.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
