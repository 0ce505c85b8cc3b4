use super::*;
use wren_core::{FakeClock, WorkflowId};
use wren_kv::{KvStore, MemStore};
use wren_storage::{StateStore, WorkflowStore};

fn worker() -> (TimerWorker<FakeClock>, Arc<WorkflowRuntime<FakeClock>>, FakeClock) {
    let kv: Arc<dyn KvStore> = Arc::new(MemStore::new());
    let clock = FakeClock::new();
    let runtime = Arc::new(WorkflowRuntime::new(
        JournalStore::new(kv.clone()),
        StateStore::new(kv.clone()),
        WorkflowStore::new(kv.clone()),
        TimerStore::new(kv.clone()),
        clock.clone(),
    ));
    runtime.register_workflow("reminder", |ctx, _input| {
        ctx.schedule_timer("wakeup", 1_000_100)?;
        Ok(Vec::new())
    });
    let counters = Arc::new(StatCounters::new());
    let w = TimerWorker::new(
        TimerStore::new(kv.clone()),
        JournalStore::new(kv),
        runtime.clone(),
        clock.clone(),
        250,
        100,
        counters,
    );
    (w, runtime, clock)
}

#[test]
fn poll_once_ignores_timers_not_yet_due() {
    let (worker, runtime, _clock) = worker();
    runtime
        .submit("reminder", Vec::new(), WorkflowId::from("wf--t1"))
        .unwrap();

    let fired = worker.poll_once().unwrap();
    assert_eq!(fired, 0);
}

#[test]
fn poll_once_fires_a_due_timer_and_appends_timer_fired() {
    let (worker, runtime, clock) = worker();
    let wf_id = WorkflowId::from("wf--t2");
    runtime.submit("reminder", Vec::new(), wf_id).unwrap();

    clock.advance(std::time::Duration::from_millis(200_000));
    let fired = worker.poll_once().unwrap();
    assert_eq!(fired, 1);

    let entries = worker.journal.get_all(&wf_id).unwrap();
    assert!(entries.iter().any(|e| e.kind == wren_storage::EntryKind::TimerFired));
}

#[test]
fn poll_once_removes_fired_timers_from_the_pending_index() {
    let (worker, runtime, clock) = worker();
    let wf_id = WorkflowId::from("wf--t3");
    runtime.submit("reminder", Vec::new(), wf_id).unwrap();
    clock.advance(std::time::Duration::from_millis(200_000));

    assert_eq!(worker.poll_once().unwrap(), 1);
    assert_eq!(worker.poll_once().unwrap(), 0);
}
