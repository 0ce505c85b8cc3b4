// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::Arc;
use wren_core::WorkflowId;
use wren_kv::MemStore;

fn store() -> TimerStore {
    TimerStore::new(Arc::new(MemStore::new()))
}

fn timer(id: &str, fire_time_ms: u64) -> DurableTimer {
    DurableTimer {
        timer_id: TimerId::from(id),
        workflow_id: WorkflowId::from("wf--1"),
        sequence_number: 0,
        fire_time_ms,
    }
}

#[test]
fn find_ready_returns_only_due_timers_in_fire_time_order() {
    let store = store();
    store.schedule(&timer("tmr-a", 300)).unwrap();
    store.schedule(&timer("tmr-b", 100)).unwrap();
    store.schedule(&timer("tmr-c", 200)).unwrap();

    let ready = store.find_ready(200, 0).unwrap();
    let ids: Vec<String> = ready.iter().map(|t| t.timer_id.to_string()).collect();
    assert_eq!(ids, vec!["tmr-b".to_string(), "tmr-c".to_string()]);
}

#[test]
fn find_ready_excludes_future_timers() {
    let store = store();
    store.schedule(&timer("tmr-a", 500)).unwrap();
    assert!(store.find_ready(100, 0).unwrap().is_empty());
}

#[test]
fn cancel_removes_a_scheduled_timer() {
    let store = store();
    let t = timer("tmr-a", 100);
    store.schedule(&t).unwrap();
    store.cancel(&t.timer_id, t.fire_time_ms).unwrap();

    assert!(store.find_ready(1000, 0).unwrap().is_empty());
}

#[test]
fn find_ready_respects_limit() {
    let store = store();
    for n in 0..5u64 {
        store.schedule(&timer(&format!("tmr-{n}"), n)).unwrap();
    }
    assert_eq!(store.find_ready(10, 2).unwrap().len(), 2);
}
