// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{ExecContext, ExecutionMode, Jid, JobRecord};
use serde_json::{Map, Value};

crate::builder! {
    pub struct JobRecordBuilder => JobRecord {
        into {
            jid: Jid = "20261018120000000000",
        }
        set {
            pid: i64 = 4242,
            extra: Map<String, Value> = Map::new(),
        }
    }
}

impl JobRecordBuilder {
    /// Add one opaque payload field.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Context for a caller in multiprocessing mode.
pub fn multiprocessing_ctx(pid: i64) -> ExecContext {
    ExecContext::new(pid, ExecutionMode::Multiprocessing)
}

/// Context for a caller thread `thread` in threaded mode, with `live` job threads.
pub fn threaded_ctx(pid: i64, thread: &str, live: &[&str]) -> ExecContext {
    ExecContext::new(pid, ExecutionMode::Threaded)
        .with_thread_name(thread)
        .with_live_threads(live.iter().copied())
}
