// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use wren_core::JsonCodec;
use wren_kv::MemStore;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Counter {
    value: u64,
}

fn store() -> StateStore {
    StateStore::new(Arc::new(MemStore::new()))
}

fn wf() -> WorkflowId {
    WorkflowId::from("wf--test")
}

#[test]
fn get_on_missing_key_is_none() {
    let store = store();
    let got: Option<Counter> = store.get::<Counter, JsonCodec>(&wf(), "counter").unwrap();
    assert_eq!(got, None);
}

#[test]
fn set_then_get_roundtrips() {
    let store = store();
    let wf_id = wf();
    store
        .set::<Counter, JsonCodec>(&wf_id, "counter", &Counter { value: 7 })
        .unwrap();

    let got = store
        .get::<Counter, JsonCodec>(&wf_id, "counter")
        .unwrap()
        .unwrap();
    assert_eq!(got, Counter { value: 7 });
}

#[test]
fn delete_removes_key() {
    let store = store();
    let wf_id = wf();
    store
        .set::<Counter, JsonCodec>(&wf_id, "counter", &Counter { value: 1 })
        .unwrap();
    store.delete(&wf_id, "counter").unwrap();

    assert_eq!(
        store.get::<Counter, JsonCodec>(&wf_id, "counter").unwrap(),
        None
    );
}

#[test]
fn keys_lists_only_this_workflows_keys_in_order() {
    let store = store();
    let a = WorkflowId::from("wf--a");
    let b = WorkflowId::from("wf--b");
    store.set::<Counter, JsonCodec>(&a, "z", &Counter { value: 1 }).unwrap();
    store.set::<Counter, JsonCodec>(&a, "a", &Counter { value: 2 }).unwrap();
    store.set::<Counter, JsonCodec>(&b, "m", &Counter { value: 3 }).unwrap();

    assert_eq!(store.keys(&a).unwrap(), vec!["a".to_string(), "z".to_string()]);
    assert_eq!(store.keys(&b).unwrap(), vec!["m".to_string()]);
}
