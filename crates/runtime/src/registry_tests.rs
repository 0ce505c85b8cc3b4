// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn function_registry_round_trips_a_handler() {
    let registry = FunctionRegistry::new();
    registry.register("upper", |input: &[u8]| {
        Ok(String::from_utf8_lossy(input).to_uppercase().into_bytes())
    });

    let handler = registry.get("upper").unwrap();
    assert_eq!(handler(b"hi").unwrap(), b"HI".to_vec());
}

#[test]
fn function_registry_get_of_unknown_name_is_none() {
    let registry = FunctionRegistry::new();
    assert!(registry.get("missing").is_none());
}

#[test]
fn workflow_registry_round_trips_a_body() {
    let registry = WorkflowRegistry::new();
    registry.register("noop", |_ctx: &mut Context<'_>, input: &[u8]| Ok(input.to_vec()));

    assert!(registry.get("noop").is_some());
    assert!(registry.get("missing").is_none());
}
