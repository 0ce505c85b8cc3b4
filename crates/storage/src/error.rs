// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;
use wren_core::CodecError;
use wren_kv::KvError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Kv(#[from] KvError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("duplicate sequence number {sequence_number} for workflow {workflow_id}")]
    DuplicateSequence {
        workflow_id: String,
        sequence_number: u64,
    },
    #[error("journal entry {workflow_id}/{sequence_number} not found")]
    EntryNotFound {
        workflow_id: String,
        sequence_number: u64,
    },
    #[error("workflow {0} not found")]
    WorkflowNotFound(String),
}
