// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::model::EntryKind;
use std::sync::Arc;
use wren_kv::MemStore;

fn store() -> JournalStore {
    JournalStore::new(Arc::new(MemStore::new()))
}

fn wf() -> WorkflowId {
    WorkflowId::from("wf--test")
}

fn entry(wf_id: &WorkflowId, seq: u64, name: &str) -> JournalEntry {
    JournalEntry::new_uncompleted(wf_id.clone(), seq, EntryKind::Call, name, b"in".to_vec())
}

#[test]
fn append_then_get_all_preserves_order() {
    let store = store();
    let wf_id = wf();
    store.append(&entry(&wf_id, 0, "a")).unwrap();
    store.append(&entry(&wf_id, 1, "b")).unwrap();
    store.append(&entry(&wf_id, 2, "c")).unwrap();

    let all = store.get_all(&wf_id).unwrap();
    let seqs: Vec<u64> = all.iter().map(|e| e.sequence_number).collect();
    assert_eq!(seqs, vec![0, 1, 2]);
    assert!(all.iter().all(|e| !e.completed));
}

#[test]
fn append_rejects_duplicate_sequence_number() {
    let store = store();
    let wf_id = wf();
    store.append(&entry(&wf_id, 0, "a")).unwrap();
    let err = store.append(&entry(&wf_id, 0, "a-again")).unwrap_err();
    assert!(matches!(err, StorageError::DuplicateSequence { .. }));
}

#[test]
fn complete_sets_output_and_completed_flag() {
    let store = store();
    let wf_id = wf();
    store.append(&entry(&wf_id, 0, "a")).unwrap();
    store.complete(&wf_id, 0, b"out".to_vec()).unwrap();

    let got = store.get(&wf_id, 0).unwrap().unwrap();
    assert!(got.completed);
    assert_eq!(got.output_payload, Some(b"out".to_vec()));
}

#[test]
fn complete_of_missing_entry_is_an_error() {
    let store = store();
    let err = store.complete(&wf(), 5, b"out".to_vec()).unwrap_err();
    assert!(matches!(err, StorageError::EntryNotFound { .. }));
}

#[test]
fn different_workflows_do_not_see_each_others_entries() {
    let store = store();
    let a = WorkflowId::from("wf--a");
    let b = WorkflowId::from("wf--b");
    store.append(&entry(&a, 0, "x")).unwrap();

    assert_eq!(store.get_all(&b).unwrap().len(), 0);
    assert_eq!(store.get_all(&a).unwrap().len(), 1);
}
