// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The durable shapes that flow through node storage (spec §3.1-§3.5).

use serde::{Deserialize, Serialize};
use wren_core::WorkflowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Call,
    SideEffect,
    StateSet,
    StateDelete,
    TimerScheduled,
    TimerFired,
    SignalReceived,
}

/// One externally observable operation of a workflow execution.
///
/// Uncompleted on append; `complete` fills in `output_payload` and flips
/// `completed` without changing the sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub workflow_id: WorkflowId,
    pub sequence_number: u64,
    pub kind: EntryKind,
    pub name: String,
    pub input_payload: Vec<u8>,
    pub output_payload: Option<Vec<u8>>,
    pub completed: bool,
}

impl JournalEntry {
    pub fn new_uncompleted(
        workflow_id: WorkflowId,
        sequence_number: u64,
        kind: EntryKind,
        name: impl Into<String>,
        input_payload: Vec<u8>,
    ) -> Self {
        Self {
            workflow_id,
            sequence_number,
            kind,
            name: name.into(),
            input_payload,
            output_payload: None,
            completed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl WorkflowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Pending => "Pending",
            WorkflowStatus::Running => "Running",
            WorkflowStatus::Completed => "Completed",
            WorkflowStatus::Failed => "Failed",
            WorkflowStatus::Cancelled => "Cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WorkflowStatus::Completed | WorkflowStatus::Failed | WorkflowStatus::Cancelled
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowMeta {
    pub workflow_id: WorkflowId,
    pub workflow_type: String,
    pub input_payload: Vec<u8>,
    pub status: WorkflowStatus,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
    pub output_payload: Option<Vec<u8>>,
    pub error: Option<String>,
}

/// `{timer_id, workflow_id, sequence_number, fire_time_ms}` (spec §3.4).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurableTimer {
    pub timer_id: wren_core::TimerId,
    pub workflow_id: WorkflowId,
    pub sequence_number: u64,
    pub fire_time_ms: u64,
}
