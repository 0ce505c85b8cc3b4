// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer-firing background worker (spec §4.11): polls the durable timer
//! index for due timers, records their firing in the journal, and nudges
//! the owning workflow to resume.

use std::sync::Arc;
use std::time::Duration;

use wren_core::Clock;
use wren_runtime::WorkflowRuntime;
use wren_storage::{EntryKind, JournalEntry, JournalStore, TimerStore};

use crate::error::NodeError;
use crate::stats::StatCounters;

pub struct TimerWorker<C: Clock> {
    timers: TimerStore,
    journal: JournalStore,
    runtime: Arc<WorkflowRuntime<C>>,
    clock: C,
    poll_interval_ms: u64,
    batch_limit: usize,
    counters: Arc<StatCounters>,
}

impl<C: Clock + 'static> TimerWorker<C> {
    pub fn new(
        timers: TimerStore,
        journal: JournalStore,
        runtime: Arc<WorkflowRuntime<C>>,
        clock: C,
        poll_interval_ms: u64,
        batch_limit: usize,
        counters: Arc<StatCounters>,
    ) -> Self {
        Self { timers, journal, runtime, clock, poll_interval_ms, batch_limit, counters }
    }

    /// Fires every timer due by now, up to `batch_limit`. Returns the number
    /// fired. Exposed separately from `run` so tests can drive it without a
    /// real sleep loop.
    pub fn poll_once(&self) -> Result<usize, NodeError> {
        let now = self.clock.epoch_ms();
        let ready = self.timers.find_ready(now, self.batch_limit)?;
        for timer in &ready {
            // The only slot a `TimerFired` marker can ever rightfully claim
            // is the one immediately after the timer's own `TimerScheduled`
            // entry — the position the body's next op would get if it
            // reached this point in the same live run. Anchoring to that
            // recorded position (rather than the journal's current trailing
            // length) is what makes this safe to run against a workflow
            // that kept appending real entries past the schedule point
            // before a transient failure: we never misplace the marker
            // into a slot a later real op already claimed, or will claim.
            let target_seq = timer.sequence_number + 1;
            match self.journal.get(&timer.workflow_id, target_seq)? {
                None => {
                    let entry = JournalEntry {
                        workflow_id: timer.workflow_id,
                        sequence_number: target_seq,
                        kind: EntryKind::TimerFired,
                        name: timer.timer_id.as_str().to_string(),
                        input_payload: timer.fire_time_ms.to_be_bytes().to_vec(),
                        output_payload: None,
                        completed: true,
                    };
                    self.journal.append(&entry)?;
                }
                Some(existing) if existing.kind == EntryKind::TimerFired => {
                    // Already recorded by an earlier poll; nothing to do.
                }
                Some(_) => {
                    // The workflow progressed past the schedule point via a
                    // real op before this timer fired (e.g. it didn't need
                    // to wait on it) — no marker to write, just stop
                    // tracking the timer and let the next resume proceed.
                }
            }
            self.timers.cancel(&timer.timer_id, timer.fire_time_ms)?;
            self.counters.record_timer_fire();
            if let Err(err) = self.runtime.resume(timer.workflow_id) {
                tracing::warn!(
                    workflow_id = %timer.workflow_id,
                    error = %err,
                    "timer-triggered resume did not complete"
                );
            }
        }
        Ok(ready.len())
    }

    /// Runs `poll_once` every `poll_interval_ms` until the task is dropped.
    pub async fn run(self: Arc<Self>) {
        let period = Duration::from_millis(self.poll_interval_ms);
        loop {
            tokio::time::sleep(period).await;
            if let Err(err) = self.poll_once() {
                tracing::warn!(error = %err, "timer poll failed");
            }
        }
    }
}

#[cfg(test)]
#[path = "timer_worker_tests.rs"]
mod tests;
