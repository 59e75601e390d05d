// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for specs.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::Duration;

pub use minion_core::{ExecContext, ExecutionMode, HostConfig, JobRecord, ThreadRegistry};
pub use minion_storage::RecordStore;
pub use tempfile::tempdir;

/// A long-running child process, killed on drop.
pub struct Sleeper(Child);

impl Sleeper {
    pub fn spawn() -> Self {
        let child = Command::new("sleep")
            .arg("300")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();
        let sleeper = Self(child);
        sleeper.wait_for_exec();
        sleeper
    }

    /// Block until the child has exec'd `sleep` and its cmdline is visible.
    fn wait_for_exec(&self) {
        if !Path::new("/proc/self").exists() {
            return;
        }
        let cmdline = format!("/proc/{}/cmdline", self.0.id());
        for _ in 0..400 {
            if std::fs::read(&cmdline).is_ok_and(|b| b.windows(5).any(|w| w == b"sleep")) {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("child {} never exec'd sleep", self.0.id());
    }

    pub fn pid(&self) -> i64 {
        i64::from(self.0.id())
    }
}

impl Drop for Sleeper {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

/// Pid of a process that has already exited and been reaped.
pub fn dead_pid() -> i64 {
    let mut child = Command::new("true").spawn().unwrap();
    let pid = i64::from(child.id());
    child.wait().unwrap();
    pid
}

pub fn own_pid() -> i64 {
    i64::from(std::process::id())
}

/// File name of this test binary; always present in its own cmdline.
pub fn own_token() -> String {
    let exe = std::env::args().next().unwrap();
    Path::new(&exe)
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned()
}

/// Record store over a temp cache dir using the real process table.
pub fn store(cache_dir: &Path, token: &str) -> RecordStore {
    RecordStore::from_config(&HostConfig::new(cache_dir).cmdline_token(token))
}

/// Register a bare record for `pid` under `jid`.
pub fn register(store: &RecordStore, pid: i64, jid: &str) -> PathBuf {
    store.register(&JobRecord::new(pid, jid)).unwrap()
}

pub fn proc_file(cache_dir: &Path, jid: &str) -> PathBuf {
    cache_dir.join("proc").join(jid)
}
