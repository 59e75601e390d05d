// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process table probe for testable liveness checks

use nix::errno::Errno;
use nix::sys::signal::kill;
use nix::unistd::Pid;
use std::path::{Path, PathBuf};

/// Answers questions about the host's live process table.
pub trait ProcessProbe: Send + Sync {
    /// Whether a process with this id currently exists. Never fails:
    /// zero, negative and out-of-range ids are simply not alive.
    fn is_alive(&self, pid: i64) -> bool;

    /// Whether the process's command line contains `token`.
    ///
    /// Hosts without a procfs-style mechanism cannot verify identity and
    /// answer `true`. Where the mechanism exists, a missing entry or an
    /// unreadable command line answers `false`.
    fn cmdline_contains(&self, pid: i64, token: &str) -> bool;
}

/// Real process table, queried through signals and procfs.
#[derive(Debug, Clone)]
pub struct SystemProbe {
    proc_root: PathBuf,
}

impl SystemProbe {
    pub fn new(proc_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
        }
    }

    pub fn proc_root(&self) -> &Path {
        &self.proc_root
    }

    /// Whether per-process command lines can be inspected on this host.
    ///
    /// Some BSDs ship an empty `/proc` with nothing mounted on it; a root with
    /// no process directories counts as absent.
    pub fn has_procfs(&self) -> bool {
        if cfg!(windows) || !self.proc_root.is_dir() {
            return false;
        }
        let Ok(entries) = std::fs::read_dir(&self.proc_root) else {
            return false;
        };
        entries
            .flatten()
            .any(|e| e.file_type().is_ok_and(|t| t.is_dir()))
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new("/proc")
    }
}

impl ProcessProbe for SystemProbe {
    fn is_alive(&self, pid: i64) -> bool {
        let Some(pid) = to_pid(pid) else {
            return false;
        };
        // Signal 0 only performs the existence and permission checks.
        // EPERM means the process exists but belongs to someone else.
        match kill(pid, None) {
            Ok(()) => true,
            Err(Errno::EPERM) => true,
            Err(_) => false,
        }
    }

    fn cmdline_contains(&self, pid: i64, token: &str) -> bool {
        if pid <= 0 {
            return false;
        }
        if !self.has_procfs() {
            return true;
        }
        let path = self.proc_root.join(pid.to_string()).join("cmdline");
        if !path.is_file() {
            return false;
        }
        match std::fs::read(&path) {
            Ok(cmdline) => contains_bytes(&cmdline, token.as_bytes()),
            Err(e) => {
                tracing::debug!(pid, error = %e, "failed to read process cmdline");
                false
            }
        }
    }
}

fn to_pid(pid: i64) -> Option<Pid> {
    i32::try_from(pid)
        .ok()
        .filter(|p| *p > 0)
        .map(Pid::from_raw)
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeProbe;

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::ProcessProbe;
    use parking_lot::Mutex;
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;

    /// Fake process table with controllable liveness and command lines.
    ///
    /// A pid that is alive but has no command line set answers
    /// `cmdline_contains` like a host without procfs (`true`) unless
    /// [`FakeProbe::with_procfs`] was called.
    #[derive(Clone, Default)]
    pub struct FakeProbe {
        inner: Arc<Mutex<Inner>>,
    }

    #[derive(Default)]
    struct Inner {
        alive: HashSet<i64>,
        cmdlines: HashMap<i64, String>,
        procfs: bool,
    }

    impl FakeProbe {
        pub fn new() -> Self {
            Self::default()
        }

        /// Mark `pid` alive with the given command line; enables procfs mode.
        pub fn spawn(&self, pid: i64, cmdline: impl Into<String>) -> &Self {
            let mut inner = self.inner.lock();
            inner.alive.insert(pid);
            inner.cmdlines.insert(pid, cmdline.into());
            inner.procfs = true;
            self
        }

        /// Mark `pid` alive without a command line.
        pub fn alive(&self, pid: i64) -> &Self {
            self.inner.lock().alive.insert(pid);
            self
        }

        pub fn kill(&self, pid: i64) -> &Self {
            let mut inner = self.inner.lock();
            inner.alive.remove(&pid);
            inner.cmdlines.remove(&pid);
            self
        }

        pub fn with_procfs(self, procfs: bool) -> Self {
            self.inner.lock().procfs = procfs;
            self
        }
    }

    impl ProcessProbe for FakeProbe {
        fn is_alive(&self, pid: i64) -> bool {
            pid > 0 && self.inner.lock().alive.contains(&pid)
        }

        fn cmdline_contains(&self, pid: i64, token: &str) -> bool {
            let inner = self.inner.lock();
            if pid <= 0 {
                return false;
            }
            if !inner.procfs {
                return true;
            }
            inner.cmdlines.get(&pid).is_some_and(|c| c.contains(token))
        }
    }
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
