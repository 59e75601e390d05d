// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution context: who is asking, passed explicitly to the validator.
//!
//! The record validator never reads the current pid, thread name or thread
//! list itself. Callers capture an [`ExecContext`] and pass it in, which keeps
//! classification a pure function of (record, context, probe).

use crate::config::ExecutionMode;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread::JoinHandle;

/// Snapshot of the caller's identity at validation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecContext {
    pub pid: i64,
    pub thread_name: Option<String>,
    pub live_threads: HashSet<String>,
    pub mode: ExecutionMode,
}

impl ExecContext {
    pub fn new(pid: i64, mode: ExecutionMode) -> Self {
        Self {
            pid,
            thread_name: None,
            live_threads: HashSet::new(),
            mode,
        }
    }

    /// Capture the current process, current thread and registered job threads.
    pub fn capture(mode: ExecutionMode, registry: &ThreadRegistry) -> Self {
        Self {
            pid: i64::from(std::process::id()),
            thread_name: std::thread::current().name().map(str::to_string),
            live_threads: registry.names(),
            mode,
        }
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = Some(name.into());
        self
    }

    pub fn with_live_threads<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.live_threads = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_own_thread(&self, name: &str) -> bool {
        self.thread_name.as_deref() == Some(name)
    }

    pub fn has_live_thread(&self, name: &str) -> bool {
        self.live_threads.contains(name)
    }
}

/// Names of the job threads currently alive in this process.
///
/// The standard library cannot enumerate threads, so threaded executors spawn
/// job threads through the registry. A name stays registered until the thread
/// body returns or unwinds.
#[derive(Debug, Clone, Default)]
pub struct ThreadRegistry {
    names: Arc<Mutex<HashSet<String>>>,
}

impl ThreadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a job thread named `name` and register it for its lifetime.
    pub fn spawn<F, T>(&self, name: impl Into<String>, f: F) -> std::io::Result<JoinHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let name = name.into();
        let guard = self.register(name.clone());
        let builder = std::thread::Builder::new().name(name);
        builder.spawn(move || {
            let _guard = guard;
            f()
        })
    }

    /// Register `name` until the returned guard is dropped.
    pub fn register(&self, name: impl Into<String>) -> Registration {
        let name = name.into();
        self.names.lock().insert(name.clone());
        Registration {
            names: Arc::clone(&self.names),
            name,
        }
    }

    pub fn names(&self) -> HashSet<String> {
        self.names.lock().clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.lock().contains(name)
    }
}

/// Keeps a thread name registered; deregisters on drop.
#[derive(Debug)]
pub struct Registration {
    names: Arc<Mutex<HashSet<String>>>,
    name: String,
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.names.lock().remove(&self.name);
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
