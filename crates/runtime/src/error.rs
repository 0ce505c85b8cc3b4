// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime failure taxonomy (spec §4.4, §7).

use thiserror::Error;
use wren_storage::StorageError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The user workflow body returned an error. Terminal: recorded in
    /// metadata, workflow moves to `Failed`, never retried automatically.
    #[error("workflow error: {0}")]
    UserError(String),

    /// Replay encountered an operation whose kind/name didn't match the
    /// journaled entry at that sequence number. Terminal.
    #[error("non-deterministic replay at seq {sequence_number}: expected {expected}, got {actual}")]
    NonDeterministicReplay {
        sequence_number: u64,
        expected: String,
        actual: String,
    },

    /// `call` referenced a name with no registered handler. Treated as a
    /// `UserError` per spec §4.4's failure table, kept distinct here for
    /// diagnostics.
    #[error("no handler registered for {0}")]
    HandlerNotFound(String),

    /// Underlying store I/O. Transient: the workflow stays `Running` and the
    /// execute loop is safe to retry.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The workflow was cancelled; a running execution observes this at its
    /// next context operation. Terminal.
    #[error("workflow cancelled")]
    Cancelled,

    #[error("workflow {0} not found")]
    NotFound(String),

    #[error("serialization error: {0}")]
    Serde(String),
}

impl From<serde_json::Error> for RuntimeError {
    fn from(e: serde_json::Error) -> Self {
        RuntimeError::Serde(e.to_string())
    }
}
