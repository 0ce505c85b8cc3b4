// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_ids_are_unique_and_prefixed() {
    let a = NodeId::new();
    let b = NodeId::new();
    assert_ne!(a, b);
    assert!(a.as_str().starts_with(NodeId::PREFIX));
}

#[test]
fn equality_against_str() {
    let id = NodeId::from_string("node-1");
    assert_eq!(id, "node-1");
}
