// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow metadata facade (spec §3.2, §4.3): metadata plus the `i:status:`
//! secondary index, kept consistent by rewriting both in one batch.

use std::sync::Arc;

use wren_core::{Codec, JsonCodec, WorkflowId};
use wren_kv::{keys, BatchOp, KvStore};

use crate::error::StorageError;
use crate::model::WorkflowMeta;

#[derive(Clone)]
pub struct WorkflowStore {
    kv: Arc<dyn KvStore>,
}

impl WorkflowStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Inserts `meta` if no record exists for its `workflow_id`. Returns
    /// `false`, leaving the existing record untouched, on a duplicate.
    pub fn create(&self, meta: &WorkflowMeta) -> Result<bool, StorageError> {
        let meta_key = keys::workflow_meta_key(meta.workflow_id.as_str());
        if self.kv.get(&meta_key)?.is_some() {
            return Ok(false);
        }
        let status_key =
            keys::status_index_key(meta.status.as_str(), meta.workflow_id.as_str());
        self.kv.batch(vec![
            BatchOp::Put(meta_key, JsonCodec::encode(meta)?),
            BatchOp::Put(status_key, Vec::new()),
        ])?;
        Ok(true)
    }

    pub fn get(&self, workflow_id: &WorkflowId) -> Result<Option<WorkflowMeta>, StorageError> {
        let key = keys::workflow_meta_key(workflow_id.as_str());
        match self.kv.get(&key)? {
            Some(raw) => Ok(Some(JsonCodec::decode(&raw)?)),
            None => Ok(None),
        }
    }

    /// Atomically rewrites metadata and the status index: the old status
    /// loses the id, the new status gains it, in a single batch so no
    /// intermediate state is ever visible to `find_by_status`.
    pub fn update(&self, meta: &WorkflowMeta) -> Result<(), StorageError> {
        let meta_key = keys::workflow_meta_key(meta.workflow_id.as_str());
        let existing = self
            .kv
            .get(&meta_key)?
            .ok_or_else(|| StorageError::WorkflowNotFound(meta.workflow_id.to_string()))?;
        let previous: WorkflowMeta = JsonCodec::decode(&existing)?;

        let mut ops = Vec::with_capacity(3);
        if previous.status.as_str() != meta.status.as_str() {
            ops.push(BatchOp::Delete(keys::status_index_key(
                previous.status.as_str(),
                meta.workflow_id.as_str(),
            )));
            ops.push(BatchOp::Put(
                keys::status_index_key(meta.status.as_str(), meta.workflow_id.as_str()),
                Vec::new(),
            ));
        }
        ops.push(BatchOp::Put(meta_key, JsonCodec::encode(meta)?));
        self.kv.batch(ops)?;
        Ok(())
    }

    /// Workflow ids with `status`, up to `limit` (0 = unbounded), in ascending
    /// id order.
    pub fn find_by_status(
        &self,
        status: &str,
        limit: usize,
    ) -> Result<Vec<WorkflowId>, StorageError> {
        let prefix = keys::status_index_prefix(status);
        let rows = self.kv.scan(&prefix)?;
        let ids = rows.into_iter().map(|(k, _)| {
            let id_bytes = &k[prefix.len()..];
            WorkflowId::from_string(String::from_utf8_lossy(id_bytes).into_owned())
        });
        Ok(if limit == 0 {
            ids.collect()
        } else {
            ids.take(limit).collect()
        })
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
