// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sled`-backed `KvStore`, used by nodes configured with a persistent
//! `data_dir` (spec §4.1, §4.9).

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::keys::prefix_end;
use crate::store::{BatchOp, KvError, KvStore};

pub struct SledStore {
    db: sled::Db,
    closed: AtomicBool,
}

impl SledStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, KvError> {
        let db = sled::open(path).map_err(|e| KvError::Backend(e.to_string()))?;
        Ok(Self {
            db,
            closed: AtomicBool::new(false),
        })
    }

    /// In-memory sled instance; useful for tests that want the real backend
    /// without touching the filesystem.
    pub fn open_temporary() -> Result<Self, KvError> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .map_err(|e| KvError::Backend(e.to_string()))?;
        Ok(Self {
            db,
            closed: AtomicBool::new(false),
        })
    }

    fn check_open(&self) -> Result<(), KvError> {
        if self.closed.load(Ordering::Acquire) {
            Err(KvError::Closed)
        } else {
            Ok(())
        }
    }
}

impl KvStore for SledStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KvError> {
        self.check_open()?;
        self.db
            .get(key)
            .map(|opt| opt.map(|v| v.to_vec()))
            .map_err(|e| KvError::Backend(e.to_string()))
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KvError> {
        self.check_open()?;
        self.db
            .insert(key, value)
            .map_err(|e| KvError::Backend(e.to_string()))?;
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<(), KvError> {
        self.check_open()?;
        self.db
            .remove(key)
            .map_err(|e| KvError::Backend(e.to_string()))?;
        Ok(())
    }

    fn scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KvError> {
        self.check_open()?;
        match prefix_end(prefix) {
            Some(end) => self.scan_range(prefix, &end),
            None => self
                .db
                .range(prefix.to_vec()..)
                .map(|r| {
                    r.map(|(k, v)| (k.to_vec(), v.to_vec()))
                        .map_err(|e| KvError::Backend(e.to_string()))
                })
                .collect(),
        }
    }

    fn scan_range(&self, start: &[u8], end: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KvError> {
        self.check_open()?;
        self.db
            .range(start.to_vec()..end.to_vec())
            .map(|r| {
                r.map(|(k, v)| (k.to_vec(), v.to_vec()))
                    .map_err(|e| KvError::Backend(e.to_string()))
            })
            .collect()
    }

    fn batch(&self, ops: Vec<BatchOp>) -> Result<(), KvError> {
        self.check_open()?;
        let mut batch = sled::Batch::default();
        for op in ops {
            match op {
                BatchOp::Put(k, v) => batch.insert(k, v),
                BatchOp::Delete(k) => batch.remove(k),
            }
        }
        self.db
            .apply_batch(batch)
            .map_err(|e| KvError::Backend(e.to_string()))
    }

    fn close(&self) -> Result<(), KvError> {
        self.closed.store(true, Ordering::Release);
        self.db
            .flush()
            .map(|_| ())
            .map_err(|e| KvError::Backend(e.to_string()))
    }
}

#[cfg(test)]
#[path = "sled_store_tests.rs"]
mod tests;
