// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn get_on_missing_key_is_none() {
    let store = MemStore::new();
    assert_eq!(store.get(b"missing").unwrap(), None);
}

#[test]
fn put_then_get_roundtrips() {
    let store = MemStore::new();
    store.put(b"k", b"v").unwrap();
    assert_eq!(store.get(b"k").unwrap(), Some(b"v".to_vec()));
}

#[test]
fn put_overwrites_existing_value() {
    let store = MemStore::new();
    store.put(b"k", b"v1").unwrap();
    store.put(b"k", b"v2").unwrap();
    assert_eq!(store.get(b"k").unwrap(), Some(b"v2".to_vec()));
}

#[test]
fn delete_removes_key() {
    let store = MemStore::new();
    store.put(b"k", b"v").unwrap();
    store.delete(b"k").unwrap();
    assert_eq!(store.get(b"k").unwrap(), None);
}

#[test]
fn delete_of_missing_key_is_not_an_error() {
    let store = MemStore::new();
    store.delete(b"missing").unwrap();
}

#[test]
fn scan_returns_only_keys_with_prefix_in_ascending_order() {
    let store = MemStore::new();
    store.put(b"a:2", b"").unwrap();
    store.put(b"a:1", b"").unwrap();
    store.put(b"b:1", b"").unwrap();

    let got: Vec<Vec<u8>> = store.scan(b"a:").unwrap().into_iter().map(|(k, _)| k).collect();
    assert_eq!(got, vec![b"a:1".to_vec(), b"a:2".to_vec()]);
}

#[test]
fn scan_with_no_matches_is_empty() {
    let store = MemStore::new();
    store.put(b"a:1", b"").unwrap();
    assert!(store.scan(b"z:").unwrap().is_empty());
}

#[test]
fn scan_range_is_half_open() {
    let store = MemStore::new();
    for k in [b"k1".as_slice(), b"k2", b"k3", b"k4"] {
        store.put(k, b"").unwrap();
    }
    let got: Vec<Vec<u8>> = store
        .scan_range(b"k1", b"k3")
        .unwrap()
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    assert_eq!(got, vec![b"k1".to_vec(), b"k2".to_vec()]);
}

#[test]
fn batch_applies_all_ops_atomically() {
    let store = MemStore::new();
    store.put(b"keep", b"1").unwrap();
    store
        .batch(vec![
            BatchOp::Put(b"a".to_vec(), b"1".to_vec()),
            BatchOp::Put(b"b".to_vec(), b"2".to_vec()),
            BatchOp::Delete(b"keep".to_vec()),
        ])
        .unwrap();

    assert_eq!(store.get(b"a").unwrap(), Some(b"1".to_vec()));
    assert_eq!(store.get(b"b").unwrap(), Some(b"2".to_vec()));
    assert_eq!(store.get(b"keep").unwrap(), None);
}

#[test]
fn operations_after_close_return_closed_error() {
    let store = MemStore::new();
    store.close().unwrap();

    assert!(matches!(store.get(b"k"), Err(KvError::Closed)));
    assert!(matches!(store.put(b"k", b"v"), Err(KvError::Closed)));
    assert!(matches!(store.delete(b"k"), Err(KvError::Closed)));
    assert!(matches!(store.scan(b"k"), Err(KvError::Closed)));
    assert!(matches!(store.scan_range(b"a", b"z"), Err(KvError::Closed)));
    assert!(matches!(store.batch(vec![]), Err(KvError::Closed)));
}
