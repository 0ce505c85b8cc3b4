// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Journal facade (spec §4.3): append-once entries, later completed in place.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use wren_core::{Codec, JsonCodec, WorkflowId};
use wren_kv::{keys, KvStore};

use crate::error::StorageError;
use crate::model::JournalEntry;

#[derive(Clone)]
pub struct JournalStore {
    kv: Arc<dyn KvStore>,
    appended: Arc<AtomicU64>,
}

impl JournalStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv, appended: Arc::new(AtomicU64::new(0)) }
    }

    /// Writes a new uncompleted entry. Rejects a sequence number already
    /// present for this workflow — sequence numbers are assigned once, by
    /// the runtime, in the order the workflow body first reaches them.
    pub fn append(&self, entry: &JournalEntry) -> Result<(), StorageError> {
        let key = keys::journal_key(entry.workflow_id.as_str(), entry.sequence_number);
        if self.kv.get(&key)?.is_some() {
            return Err(StorageError::DuplicateSequence {
                workflow_id: entry.workflow_id.to_string(),
                sequence_number: entry.sequence_number,
            });
        }
        let bytes = JsonCodec::encode(entry)?;
        self.kv.put(&key, &bytes)?;
        self.appended.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Total entries appended through this handle (and every clone of it)
    /// since the process started; not persisted, for operator stats only.
    pub fn appended_count(&self) -> u64 {
        self.appended.load(Ordering::Relaxed)
    }

    /// Fills in the output of an already-appended entry and marks it
    /// completed. The sequence number and everything else is unchanged.
    pub fn complete(
        &self,
        workflow_id: &WorkflowId,
        sequence_number: u64,
        output: Vec<u8>,
    ) -> Result<(), StorageError> {
        let key = keys::journal_key(workflow_id.as_str(), sequence_number);
        let raw = self
            .kv
            .get(&key)?
            .ok_or_else(|| StorageError::EntryNotFound {
                workflow_id: workflow_id.to_string(),
                sequence_number,
            })?;
        let mut entry: JournalEntry = JsonCodec::decode(&raw)?;
        entry.output_payload = Some(output);
        entry.completed = true;
        let bytes = JsonCodec::encode(&entry)?;
        self.kv.put(&key, &bytes)?;
        Ok(())
    }

    /// All entries for a workflow, in ascending sequence-number order.
    pub fn get_all(&self, workflow_id: &WorkflowId) -> Result<Vec<JournalEntry>, StorageError> {
        let prefix = keys::journal_prefix(workflow_id.as_str());
        let rows = self.kv.scan(&prefix)?;
        rows.into_iter()
            .map(|(_, v)| JsonCodec::decode(&v).map_err(StorageError::from))
            .collect()
    }

    /// The entry at `sequence_number`, if it has been appended.
    pub fn get(
        &self,
        workflow_id: &WorkflowId,
        sequence_number: u64,
    ) -> Result<Option<JournalEntry>, StorageError> {
        let key = keys::journal_key(workflow_id.as_str(), sequence_number);
        match self.kv.get(&key)? {
            Some(raw) => Ok(Some(JsonCodec::decode(&raw)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;
