// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Liveness record store rooted at `<cache_dir>/proc`.
//!
//! One file per job, named by its jid. Executors [`register`](RecordStore::register)
//! a record when a job starts and [`release`](RecordStore::release) it when the
//! job finishes. Readers call [`running`](RecordStore::running), which deletes
//! any record left behind by a worker that died without cleaning up.

use crate::validate::{classify, Verdict};
use crate::StoreError;
use minion_core::{
    ExecContext, HostConfig, Jid, JobRecord, JsonCodec, ProcessProbe, RecordCodec, SystemProbe,
};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How long a `register` temp file may sit before the lister treats it as abandoned.
pub const TMP_GRACE: Duration = Duration::from_secs(60);

pub struct RecordStore<C = JsonCodec, P = SystemProbe> {
    proc_dir: PathBuf,
    codec: C,
    probe: P,
    cmdline_token: String,
}

impl RecordStore {
    /// Store for this host using the JSON codec and the real process table.
    pub fn from_config(config: &HostConfig) -> Self {
        Self::new(
            config.proc_dir(),
            JsonCodec,
            SystemProbe::new(&config.proc_root),
            config.cmdline_token.clone(),
        )
    }
}

impl<C: RecordCodec, P: ProcessProbe> RecordStore<C, P> {
    pub fn new(
        proc_dir: impl Into<PathBuf>,
        codec: C,
        probe: P,
        cmdline_token: impl Into<String>,
    ) -> Self {
        Self {
            proc_dir: proc_dir.into(),
            codec,
            probe,
            cmdline_token: cmdline_token.into(),
        }
    }

    pub fn proc_dir(&self) -> &Path {
        &self.proc_dir
    }

    pub fn record_path(&self, jid: &Jid) -> PathBuf {
        self.proc_dir.join(jid.as_str())
    }

    /// Read and classify one record, deleting it if stale.
    ///
    /// Returns `None` for anything but a running peer job. Read failures
    /// (including the file vanishing) leave the path untouched.
    pub fn validate(&self, path: &Path, ctx: &ExecContext) -> Option<JobRecord> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    tracing::debug!(path = %path.display(), error = %e, "failed to read record");
                }
                return None;
            }
        };

        let token = &self.cmdline_token;
        match classify(&bytes, ctx, &self.codec, &self.probe, token) {
            Verdict::Valid(record) => Some(record),
            Verdict::Keep(reason) => {
                tracing::trace!(path = %path.display(), %reason, "skipping record");
                None
            }
            Verdict::Stale(reason) => {
                tracing::debug!(path = %path.display(), %reason, "removing stale record");
                remove_record(path);
                None
            }
        }
    }

    /// All records describing jobs that are running in some other process or thread.
    ///
    /// A missing store (or a store path that is not a directory) is an empty
    /// result. Any other failure to list the root is an error. Order is
    /// unspecified.
    pub fn running(&self, ctx: &ExecContext) -> Result<Vec<JobRecord>, StoreError> {
        let entries = match std::fs::read_dir(&self.proc_dir) {
            Ok(entries) => entries,
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                return Ok(Vec::new())
            }
            Err(source) => {
                return Err(StoreError::RootUnreadable {
                    path: self.proc_dir.clone(),
                    source,
                })
            }
        };

        let mut running = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable record entry");
                    continue;
                }
            };
            // Dot-files are `register` temp files; only abandoned ones are collected.
            if entry.file_name().to_string_lossy().starts_with('.') {
                if is_abandoned_write(&entry) {
                    tracing::debug!(path = %entry.path().display(), "removing abandoned write");
                    remove_record(&entry.path());
                }
                continue;
            }
            if let Some(record) = self.validate(&entry.path(), ctx) {
                running.push(record);
            }
        }
        Ok(running)
    }

    /// Write the record for a starting job.
    ///
    /// The file is written under a dot-prefixed temporary name and renamed
    /// into place, so readers never see a partial record.
    pub fn register(&self, record: &JobRecord) -> Result<PathBuf, StoreError> {
        check_jid(&record.jid)?;
        std::fs::create_dir_all(&self.proc_dir)?;

        let path = self.record_path(&record.jid);
        let tmp_path = self.proc_dir.join(format!(".{}.tmp", record.jid));
        let bytes = self.codec.encode(record)?;
        std::fs::write(&tmp_path, bytes)?;
        std::fs::rename(&tmp_path, &path)?;
        Ok(path)
    }

    /// Remove the record for a finished job. Returns whether a file was removed.
    pub fn release(&self, jid: &Jid) -> Result<bool, StoreError> {
        check_jid(jid)?;
        match std::fs::remove_file(self.record_path(jid)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// A `register` temp file whose writer has not renamed it within [`TMP_GRACE`].
fn is_abandoned_write(entry: &std::fs::DirEntry) -> bool {
    let name = entry.file_name();
    if !name.to_string_lossy().ends_with(".tmp") {
        return false;
    }
    match entry.metadata() {
        Ok(meta) => meta
            .modified()
            .ok()
            .and_then(|mtime| mtime.elapsed().ok())
            .is_some_and(|age| age > TMP_GRACE),
        Err(_) => false,
    }
}

/// Delete a stale record. Losing the race to another deleter is fine.
fn remove_record(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove stale record");
        }
    }
}

/// A jid names a single file: non-empty, no separators, not hidden.
pub(crate) fn check_jid(jid: &Jid) -> Result<(), StoreError> {
    let s = jid.as_str();
    if s.is_empty() || s.starts_with('.') || s.contains(['/', '\\', '\0']) {
        return Err(StoreError::InvalidJid(s.to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
