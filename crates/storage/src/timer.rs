// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable timer facade (spec §3.4, §4.3): indexed by fire time for
//! efficient "find timers due by now" scans.

use std::sync::Arc;

use wren_core::{Codec, JsonCodec, TimerId};
use wren_kv::{keys, KvStore};

use crate::error::StorageError;
use crate::model::DurableTimer;

#[derive(Clone)]
pub struct TimerStore {
    kv: Arc<dyn KvStore>,
}

impl TimerStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    pub fn schedule(&self, timer: &DurableTimer) -> Result<(), StorageError> {
        let key = keys::timer_key(timer.fire_time_ms, timer.timer_id.as_str());
        self.kv.put(&key, &JsonCodec::encode(timer)?)?;
        Ok(())
    }

    /// Removes a timer. Needs the fire time to locate its key; callers keep
    /// it around from the original [`DurableTimer`].
    pub fn cancel(&self, timer_id: &TimerId, fire_time_ms: u64) -> Result<(), StorageError> {
        let key = keys::timer_key(fire_time_ms, timer_id.as_str());
        self.kv.delete(&key)?;
        Ok(())
    }

    /// Timers with `fire_time_ms <= now_ms`, up to `limit` (0 = unbounded),
    /// in ascending fire-time order.
    pub fn find_ready(
        &self,
        now_ms: u64,
        limit: usize,
    ) -> Result<Vec<DurableTimer>, StorageError> {
        let end = keys::timer_key(now_ms.saturating_add(1), "");
        let rows = self.kv.scan_range(keys::TIMER_PREFIX, &end)?;
        let timers = rows
            .into_iter()
            .map(|(_, v)| JsonCodec::decode(&v).map_err(StorageError::from));
        if limit == 0 {
            timers.collect()
        } else {
            timers.take(limit).collect()
        }
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
