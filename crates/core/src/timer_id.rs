// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable timer identifier.

crate::define_id! {
    /// Unique identifier for a durable timer.
    pub struct TimerId("tmr-");
}

#[cfg(test)]
#[path = "timer_id_tests.rs"]
mod tests;
