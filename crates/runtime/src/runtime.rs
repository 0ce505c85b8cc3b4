// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `WorkflowRuntime`: submit/resume/cancel over the replay engine (spec §4.4).
//!
//! Per-workflow execution is serialized by a lock keyed on `workflow_id`
//! (§5), mirroring the effect executor's single `Arc<Mutex<..>>` state guard.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use wren_core::{Clock, WorkflowId};
use wren_storage::{JournalStore, StateStore, TimerStore, WorkflowMeta, WorkflowStatus, WorkflowStore};

use crate::context::Context;
use crate::error::RuntimeError;
use crate::registry::{FunctionRegistry, WorkflowRegistry};

/// Per-workflow execution guard plus the cancellation flag a running
/// `Context` polls at every operation (§5, §7: "cancellation always wins").
/// The flag lives next to the lock rather than behind it, so `cancel()`
/// never has to wait out an in-flight execution to signal it.
#[derive(Default)]
struct WorkflowHandle {
    lock: Mutex<()>,
    cancelled: AtomicBool,
}

#[derive(Default)]
struct WorkflowLocks {
    handles: Mutex<HashMap<WorkflowId, Arc<WorkflowHandle>>>,
}

impl WorkflowLocks {
    fn handle_for(&self, id: &WorkflowId) -> Arc<WorkflowHandle> {
        self.handles.lock().entry(*id).or_default().clone()
    }
}

pub struct WorkflowRuntime<C: Clock> {
    journal: JournalStore,
    state: StateStore,
    workflows: WorkflowStore,
    timers: TimerStore,
    functions: FunctionRegistry,
    workflow_bodies: WorkflowRegistry,
    locks: WorkflowLocks,
    clock: C,
}

impl<C: Clock> WorkflowRuntime<C> {
    pub fn new(
        journal: JournalStore,
        state: StateStore,
        workflows: WorkflowStore,
        timers: TimerStore,
        clock: C,
    ) -> Self {
        Self {
            journal,
            state,
            workflows,
            timers,
            functions: FunctionRegistry::new(),
            workflow_bodies: WorkflowRegistry::new(),
            locks: WorkflowLocks::default(),
            clock,
        }
    }

    pub fn register_function<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(&[u8]) -> Result<Vec<u8>, String> + Send + Sync + 'static,
    {
        self.functions.register(name, handler);
    }

    pub fn register_workflow<F>(&self, name: impl Into<String>, body: F)
    where
        F: for<'a> Fn(&mut Context<'a>, &[u8]) -> Result<Vec<u8>, RuntimeError> + Send + Sync + 'static,
    {
        self.workflow_bodies.register(name, body);
    }

    /// Creates the workflow record (`Pending`) and runs it to completion or
    /// to the first unresolved suspension. Returns the final output once the
    /// body returns; failures are recorded in metadata before being surfaced.
    pub fn submit(
        &self,
        workflow_type: &str,
        input: Vec<u8>,
        workflow_id: WorkflowId,
    ) -> Result<Vec<u8>, RuntimeError> {
        let now = self.clock.epoch_ms();
        let meta = WorkflowMeta {
            workflow_id,
            workflow_type: workflow_type.to_string(),
            input_payload: input,
            status: WorkflowStatus::Pending,
            created_at_ms: now,
            updated_at_ms: now,
            output_payload: None,
            error: None,
        };
        self.workflows.create(&meta)?;
        self.run(workflow_id)
    }

    /// Re-runs a workflow's body from the start; replay short-circuits every
    /// already-completed journal entry. No-ops (returns the stored output)
    /// if the workflow already reached a terminal status.
    pub fn resume(&self, workflow_id: WorkflowId) -> Result<Vec<u8>, RuntimeError> {
        let meta = self
            .workflows
            .get(&workflow_id)?
            .ok_or_else(|| RuntimeError::NotFound(workflow_id.to_string()))?;
        if meta.status.is_terminal() {
            return match meta.status {
                WorkflowStatus::Cancelled => Err(RuntimeError::Cancelled),
                WorkflowStatus::Failed => {
                    Err(RuntimeError::UserError(meta.error.unwrap_or_default()))
                }
                _ => Ok(meta.output_payload.unwrap_or_default()),
            };
        }
        self.run(workflow_id)
    }

    /// Transitions the workflow to `Cancelled` and signals any in-flight
    /// execution, which observes the flag at its next context operation and
    /// unwinds with `RuntimeError::Cancelled` (§5, §7). Idempotent:
    /// cancelling an already-terminal workflow is a no-op that still
    /// returns `true`.
    pub fn cancel(&self, workflow_id: WorkflowId) -> Result<bool, RuntimeError> {
        let mut meta = match self.workflows.get(&workflow_id)? {
            Some(meta) => meta,
            None => return Ok(false),
        };
        if meta.status.is_terminal() {
            return Ok(true);
        }
        self.locks.handle_for(&workflow_id).cancelled.store(true, Ordering::Release);
        meta.status = WorkflowStatus::Cancelled;
        meta.updated_at_ms = self.clock.epoch_ms();
        self.workflows.update(&meta)?;
        Ok(true)
    }

    pub fn get_meta(&self, workflow_id: &WorkflowId) -> Result<Option<WorkflowMeta>, RuntimeError> {
        Ok(self.workflows.get(workflow_id)?)
    }

    /// Invokes a registered function directly, outside of any workflow's
    /// journal — the remote-executor counterpart of `Context::call` (spec
    /// §6.2 `CallFunction`).
    pub fn call_function(&self, name: &str, request: &[u8]) -> Result<Vec<u8>, RuntimeError> {
        let handler = self
            .functions
            .get(name)
            .ok_or_else(|| RuntimeError::HandlerNotFound(name.to_string()))?;
        handler(request).map_err(RuntimeError::UserError)
    }

    fn run(&self, workflow_id: WorkflowId) -> Result<Vec<u8>, RuntimeError> {
        let handle = self.locks.handle_for(&workflow_id);
        let _guard = handle.lock.lock();

        let mut meta = self
            .workflows
            .get(&workflow_id)?
            .ok_or_else(|| RuntimeError::NotFound(workflow_id.to_string()))?;
        if meta.status.is_terminal() {
            return Ok(meta.output_payload.unwrap_or_default());
        }

        let body = self
            .workflow_bodies
            .get(&meta.workflow_type)
            .ok_or_else(|| RuntimeError::HandlerNotFound(meta.workflow_type.clone()))?;

        if meta.status == WorkflowStatus::Pending {
            meta.status = WorkflowStatus::Running;
            meta.updated_at_ms = self.clock.epoch_ms();
            self.workflows.update(&meta)?;
        }

        let entries = self.journal.get_all(&workflow_id)?;
        let mut ctx = Context::new(
            workflow_id,
            entries,
            &self.journal,
            &self.state,
            &self.timers,
            &self.functions,
            &handle.cancelled,
        );

        let input = meta.input_payload.clone();
        match body(&mut ctx, &input) {
            Ok(output) => {
                meta.status = WorkflowStatus::Completed;
                meta.output_payload = Some(output.clone());
                meta.updated_at_ms = self.clock.epoch_ms();
                self.workflows.update(&meta)?;
                Ok(output)
            }
            Err(RuntimeError::Cancelled) => {
                meta.status = WorkflowStatus::Cancelled;
                meta.updated_at_ms = self.clock.epoch_ms();
                self.workflows.update(&meta)?;
                Err(RuntimeError::Cancelled)
            }
            Err(RuntimeError::Storage(e)) => {
                // Transient: leave status as Running, safe to retry the execute loop.
                Err(RuntimeError::Storage(e))
            }
            Err(err) => {
                meta.status = WorkflowStatus::Failed;
                meta.error = Some(err.to_string());
                meta.updated_at_ms = self.clock.epoch_ms();
                self.workflows.update(&meta)?;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
