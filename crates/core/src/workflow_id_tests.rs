// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_ids_are_unique_and_prefixed() {
    let a = WorkflowId::new();
    let b = WorkflowId::new();
    assert_ne!(a, b);
    assert!(a.as_str().starts_with(WorkflowId::PREFIX));
}

#[test]
fn from_string_roundtrips() {
    let id = WorkflowId::from_string("wf--fixed-test-id");
    assert_eq!(id.as_str(), "wf--fixed-test-id");
    let json = serde_json::to_string(&id).unwrap();
    let back: WorkflowId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, back);
}

#[test]
fn suffix_strips_prefix() {
    let id = WorkflowId::from_string("wf--abc123");
    assert_eq!(id.suffix(), "abc123");
}
