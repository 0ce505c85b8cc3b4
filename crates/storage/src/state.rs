// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-workflow state facade (spec §3.3, §4.3): `(workflow_id, user_key) → bytes`,
//! lifetime equal to the owning workflow's lifetime.

use std::sync::Arc;

use wren_core::{Codec, WorkflowId};
use wren_kv::{keys, KvStore};

use crate::error::StorageError;

#[derive(Clone)]
pub struct StateStore {
    kv: Arc<dyn KvStore>,
}

impl StateStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    pub fn get<T, C: Codec<T>>(
        &self,
        workflow_id: &WorkflowId,
        key: &str,
    ) -> Result<Option<T>, StorageError> {
        let k = keys::state_key(workflow_id.as_str(), key);
        match self.kv.get(&k)? {
            Some(raw) => Ok(Some(C::decode(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set<T, C: Codec<T>>(
        &self,
        workflow_id: &WorkflowId,
        key: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let k = keys::state_key(workflow_id.as_str(), key);
        let bytes = C::encode(value)?;
        self.kv.put(&k, &bytes)?;
        Ok(())
    }

    pub fn delete(&self, workflow_id: &WorkflowId, key: &str) -> Result<(), StorageError> {
        let k = keys::state_key(workflow_id.as_str(), key);
        self.kv.delete(&k)?;
        Ok(())
    }

    /// User keys currently set for a workflow, in ascending order.
    pub fn keys(&self, workflow_id: &WorkflowId) -> Result<Vec<String>, StorageError> {
        let prefix = keys::state_prefix(workflow_id.as_str());
        let rows = self.kv.scan(&prefix)?;
        Ok(rows
            .into_iter()
            .filter_map(|(k, _)| {
                std::str::from_utf8(&k[prefix.len()..])
                    .ok()
                    .map(str::to_owned)
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
