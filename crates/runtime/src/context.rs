// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The workflow `ctx` (spec §4.4, §9): a cursor over a journal loaded once
//! at the start of `execute`, not a thread-local or global. Replay reads
//! completed entries from `entries` without invoking anything; once the
//! cursor runs past the loaded entries, every operation appends, performs
//! its effect, and completes — live mode.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::de::DeserializeOwned;
use serde::Serialize;
use wren_core::{TimerId, WorkflowId};
use wren_storage::{DurableTimer, EntryKind, JournalEntry, JournalStore, StateStore, TimerStore};

use crate::error::RuntimeError;
use crate::registry::FunctionRegistry;

enum Outcome {
    Replayed(Option<Vec<u8>>),
    Live(u64),
}

/// A journal cursor: replay position plus the live-append tail, exactly the
/// shape the design notes ask for instead of a thread-local `ctx`.
pub struct Context<'a> {
    workflow_id: WorkflowId,
    entries: Vec<JournalEntry>,
    next_seq: u64,
    journal: &'a JournalStore,
    state: &'a StateStore,
    timers: &'a TimerStore,
    functions: &'a FunctionRegistry,
    cancelled: &'a AtomicBool,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        workflow_id: WorkflowId,
        entries: Vec<JournalEntry>,
        journal: &'a JournalStore,
        state: &'a StateStore,
        timers: &'a TimerStore,
        functions: &'a FunctionRegistry,
        cancelled: &'a AtomicBool,
    ) -> Self {
        Self {
            workflow_id,
            entries,
            next_seq: 0,
            journal,
            state,
            timers,
            functions,
            cancelled,
        }
    }

    pub fn workflow_id(&self) -> &WorkflowId {
        &self.workflow_id
    }

    fn check_cancelled(&self) -> Result<(), RuntimeError> {
        if self.cancelled.load(Ordering::Acquire) {
            Err(RuntimeError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Resolves the operation at the current cursor position: either a
    /// journaled outcome (replay) or a freshly appended uncompleted entry
    /// the caller must perform the effect for and then `complete`.
    fn resolve(
        &mut self,
        kind: EntryKind,
        name: &str,
        input: Vec<u8>,
    ) -> Result<Outcome, RuntimeError> {
        self.check_cancelled()?;
        let seq = self.next_seq;

        if let Some(existing) = self.entries.get(seq as usize) {
            if existing.kind != kind || existing.name != name {
                return Err(RuntimeError::NonDeterministicReplay {
                    sequence_number: seq,
                    expected: format!("{:?}:{}", existing.kind, existing.name),
                    actual: format!("{kind:?}:{name}"),
                });
            }
            if existing.completed {
                self.next_seq += 1;
                return Ok(Outcome::Replayed(existing.output_payload.clone()));
            }
        } else {
            let entry =
                JournalEntry::new_uncompleted(self.workflow_id, seq, kind, name, input);
            self.journal.append(&entry)?;
            self.entries.push(entry);
        }
        self.next_seq += 1;
        Ok(Outcome::Live(seq))
    }

    fn complete(&mut self, seq: u64, output: Vec<u8>) -> Result<(), RuntimeError> {
        self.journal.complete(&self.workflow_id, seq, output.clone())?;
        if let Some(entry) = self.entries.get_mut(seq as usize) {
            entry.output_payload = Some(output);
            entry.completed = true;
        }
        Ok(())
    }

    /// Invokes a pre-registered handler. `Req`/`Res` round-trip through JSON.
    pub fn call<Req: Serialize, Res: DeserializeOwned>(
        &mut self,
        name: &str,
        req: &Req,
    ) -> Result<Res, RuntimeError> {
        let input = serde_json::to_vec(req)?;
        match self.resolve(EntryKind::Call, name, input)? {
            Outcome::Replayed(out) => {
                let out = out.unwrap_or_default();
                Ok(serde_json::from_slice(&out)?)
            }
            Outcome::Live(seq) => {
                let handler = self
                    .functions
                    .get(name)
                    .ok_or_else(|| RuntimeError::HandlerNotFound(name.to_string()))?;
                let raw_input = self
                    .entries
                    .get(seq as usize)
                    .map(|e| e.input_payload.clone())
                    .unwrap_or_default();
                let out = handler(&raw_input).map_err(RuntimeError::UserError)?;
                self.complete(seq, out.clone())?;
                Ok(serde_json::from_slice(&out)?)
            }
        }
    }

    /// Runs `thunk` exactly once across retries; its result is captured in
    /// the journal so replay never re-invokes it.
    pub fn side_effect<T, F>(&mut self, name: &str, thunk: F) -> Result<T, RuntimeError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.resolve(EntryKind::SideEffect, name, Vec::new())? {
            Outcome::Replayed(out) => {
                let out = out.unwrap_or_default();
                Ok(serde_json::from_slice(&out)?)
            }
            Outcome::Live(seq) => {
                let value = thunk();
                let out = serde_json::to_vec(&value)?;
                self.complete(seq, out)?;
                Ok(value)
            }
        }
    }

    pub fn set_state<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), RuntimeError> {
        let bytes = serde_json::to_vec(value)?;
        match self.resolve(EntryKind::StateSet, key, bytes.clone())? {
            Outcome::Replayed(_) => Ok(()),
            Outcome::Live(seq) => {
                self.state.set::<Vec<u8>, wren_core::JsonCodec>(
                    &self.workflow_id,
                    key,
                    &bytes,
                )?;
                self.complete(seq, Vec::new())
            }
        }
    }

    pub fn get_state<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, RuntimeError> {
        let raw: Option<Vec<u8>> =
            self.state
                .get::<Vec<u8>, wren_core::JsonCodec>(&self.workflow_id, key)?;
        match raw {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn delete_state(&mut self, key: &str) -> Result<(), RuntimeError> {
        match self.resolve(EntryKind::StateDelete, key, Vec::new())? {
            Outcome::Replayed(_) => Ok(()),
            Outcome::Live(seq) => {
                self.state.delete(&self.workflow_id, key)?;
                self.complete(seq, Vec::new())
            }
        }
    }

    /// Schedules a durable timer and returns immediately; firing is observed
    /// by a later `resume` once the owning node's timer worker appends a
    /// `TimerFired` entry.
    pub fn schedule_timer(&mut self, name: &str, fire_time_ms: u64) -> Result<TimerId, RuntimeError> {
        match self.resolve(EntryKind::TimerScheduled, name, fire_time_ms.to_be_bytes().to_vec())? {
            Outcome::Replayed(out) => {
                let bytes = out.unwrap_or_default();
                let id_str = String::from_utf8(bytes).unwrap_or_default();
                Ok(TimerId::from(id_str.as_str()))
            }
            Outcome::Live(seq) => {
                let timer_id = TimerId::new();
                self.timers.schedule(&DurableTimer {
                    timer_id,
                    workflow_id: self.workflow_id,
                    sequence_number: seq,
                    fire_time_ms,
                })?;
                self.complete(seq, timer_id.as_str().as_bytes().to_vec())?;
                Ok(timer_id)
            }
        }
    }

    /// Blocks the calling thread until `duration_ms` has elapsed. Journaled
    /// so replay is instant: the sleep already happened on the live run.
    pub fn sleep(&mut self, name: &str, duration_ms: u64) -> Result<(), RuntimeError> {
        match self.resolve(EntryKind::TimerScheduled, name, duration_ms.to_be_bytes().to_vec())? {
            Outcome::Replayed(_) => Ok(()),
            Outcome::Live(seq) => {
                std::thread::sleep(std::time::Duration::from_millis(duration_ms));
                self.complete(seq, Vec::new())
            }
        }
    }

    /// Extension point (spec §9 open question): records that a named signal
    /// was observed. Delivery is out of scope here; callers append the
    /// entry once the signal payload is available out-of-band.
    pub fn await_signal<T: DeserializeOwned>(
        &mut self,
        name: &str,
        payload: Vec<u8>,
    ) -> Result<T, RuntimeError> {
        match self.resolve(EntryKind::SignalReceived, name, payload.clone())? {
            Outcome::Replayed(out) => {
                let out = out.unwrap_or_default();
                Ok(serde_json::from_slice(&out)?)
            }
            Outcome::Live(seq) => {
                self.complete(seq, payload.clone())?;
                Ok(serde_json::from_slice(&payload)?)
            }
        }
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
