// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record store scenarios against the live process table.

use std::sync::mpsc;

use crate::prelude::*;

fn multiprocessing() -> ExecContext {
    ExecContext::capture(ExecutionMode::Multiprocessing, &ThreadRegistry::new())
}

#[test]
fn no_proc_dir_lists_nothing() {
    let cache = tempdir().unwrap();
    let store = store(cache.path(), "sleep");

    assert!(store.running(&multiprocessing()).unwrap().is_empty());
}

#[test]
fn dead_pid_record_is_collected() {
    let cache = tempdir().unwrap();
    let store = store(cache.path(), "sleep");
    register(&store, dead_pid(), "j-dead");

    assert!(store.running(&multiprocessing()).unwrap().is_empty());
    assert!(!proc_file(cache.path(), "j-dead").exists());
}

#[test]
fn own_process_record_is_not_reported_or_deleted() {
    let cache = tempdir().unwrap();
    let store = store(cache.path(), &own_token());
    register(&store, own_pid(), "j-mine");

    assert!(store.running(&multiprocessing()).unwrap().is_empty());
    assert!(proc_file(cache.path(), "j-mine").exists());
}

#[test]
fn live_worker_process_is_reported() {
    let cache = tempdir().unwrap();
    let store = store(cache.path(), "sleep");
    let worker = Sleeper::spawn();
    let record = JobRecord::new(worker.pid(), "j-worker").with_field("fun", "test.sleep");
    store.register(&record).unwrap();

    let running = store.running(&multiprocessing()).unwrap();

    assert_eq!(running.len(), 1);
    assert_eq!(running[0].jid, "j-worker");
    assert_eq!(running[0].pid, worker.pid());
}

#[cfg(target_os = "linux")]
#[test]
fn live_pid_running_another_program_is_collected() {
    let cache = tempdir().unwrap();
    let store = store(cache.path(), "minion");
    let unrelated = Sleeper::spawn();
    register(&store, unrelated.pid(), "j-recycled");

    assert!(store.running(&multiprocessing()).unwrap().is_empty());
    assert!(!proc_file(cache.path(), "j-recycled").exists());
}

#[test]
fn threaded_peer_thread_is_reported() {
    let cache = tempdir().unwrap();
    let store = store(cache.path(), &own_token());
    let registry = ThreadRegistry::new();
    let (started_tx, started_rx) = mpsc::channel();
    let (done_tx, done_rx) = mpsc::channel::<()>();

    let peer = registry
        .spawn("j-peer", move || {
            started_tx.send(()).unwrap();
            done_rx.recv().unwrap();
        })
        .unwrap();
    started_rx.recv().unwrap();
    register(&store, own_pid(), "j-peer");

    let ctx = ExecContext::capture(ExecutionMode::Threaded, &registry);
    let running = store.running(&ctx).unwrap();

    done_tx.send(()).unwrap();
    peer.join().unwrap();
    assert_eq!(running.len(), 1);
    assert_eq!(running[0].jid, "j-peer");
}

#[test]
fn threaded_record_sees_itself_as_own() {
    let cache = tempdir().unwrap();
    let store = store(cache.path(), &own_token());
    let registry = ThreadRegistry::new();
    register(&store, own_pid(), "j-self");

    let path = proc_file(cache.path(), "j-self");
    let inner_registry = registry.clone();
    let seen = registry
        .spawn("j-self", move || {
            let ctx = ExecContext::capture(ExecutionMode::Threaded, &inner_registry);
            store.validate(&path, &ctx)
        })
        .unwrap()
        .join()
        .unwrap();

    assert!(seen.is_none());
    assert!(proc_file(cache.path(), "j-self").exists());
}

#[test]
fn threaded_record_of_finished_thread_is_collected() {
    let cache = tempdir().unwrap();
    let store = store(cache.path(), &own_token());
    let registry = ThreadRegistry::new();
    let finished = registry.spawn("j-finished", || ()).unwrap();
    finished.join().unwrap();
    register(&store, own_pid(), "j-finished");

    let ctx = ExecContext::capture(ExecutionMode::Threaded, &registry);

    assert!(store.running(&ctx).unwrap().is_empty());
    assert!(!proc_file(cache.path(), "j-finished").exists());
}

#[test]
fn threaded_record_from_other_process_is_collected() {
    let cache = tempdir().unwrap();
    let store = store(cache.path(), "sleep");
    let other = Sleeper::spawn();
    register(&store, other.pid(), "j-old-generation");

    let ctx = ExecContext::capture(ExecutionMode::Threaded, &ThreadRegistry::new());

    assert!(store.running(&ctx).unwrap().is_empty());
    assert!(!proc_file(cache.path(), "j-old-generation").exists());
}

#[test]
fn empty_record_is_collected() {
    let cache = tempdir().unwrap();
    let store = store(cache.path(), "sleep");
    std::fs::create_dir_all(cache.path().join("proc")).unwrap();
    std::fs::write(proc_file(cache.path(), "j-empty"), b"").unwrap();

    assert!(store.running(&multiprocessing()).unwrap().is_empty());
    assert!(!proc_file(cache.path(), "j-empty").exists());
}

#[test]
fn concurrent_listers_agree_and_never_fail() {
    let cache = tempdir().unwrap();
    let worker = Sleeper::spawn();
    {
        let store = store(cache.path(), "sleep");
        register(&store, worker.pid(), "j-live");
        for i in 0..20 {
            register(&store, dead_pid(), &format!("j-dead-{i}"));
        }
    }

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let path = cache.path().to_path_buf();
            std::thread::spawn(move || {
                let store = store(&path, "sleep");
                store.running(&multiprocessing()).unwrap()
            })
        })
        .collect();

    for handle in handles {
        let running = handle.join().unwrap();
        assert_eq!(running.len(), 1);
        assert_eq!(running[0].jid, "j-live");
    }
    let proc_dir = cache.path().join("proc");
    let remaining = std::fs::read_dir(proc_dir).unwrap().count();
    assert_eq!(remaining, 1);
}
