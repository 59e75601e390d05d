// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cached job results under `<cache_dir>/minion_jobs/<jid>/return.p`.

use crate::store::check_jid;
use crate::StoreError;
use minion_core::{HostConfig, Jid, JsonCodec, RecordCodec};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name of a cached result inside its job directory.
pub const RESULT_FILE: &str = "return.p";

pub struct ResultCache<C = JsonCodec> {
    root: PathBuf,
    codec: C,
}

impl ResultCache {
    pub fn from_config(config: &HostConfig) -> Self {
        Self::new(config.jobs_dir(), JsonCodec)
    }
}

impl<C: RecordCodec> ResultCache<C> {
    pub fn new(root: impl Into<PathBuf>, codec: C) -> Self {
        Self {
            root: root.into(),
            codec,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn result_path(&self, jid: &Jid) -> PathBuf {
        self.root.join(jid.as_str()).join(RESULT_FILE)
    }

    /// Store a job's result, replacing any earlier one.
    ///
    /// The job directory is created before the file is written; a reader
    /// racing in between sees a directory without a result.
    pub fn persist(&self, jid: &Jid, result: &Value) -> Result<PathBuf, StoreError> {
        check_jid(jid)?;
        let path = self.result_path(jid);
        let job_dir = self.root.join(jid.as_str());
        std::fs::create_dir_all(&job_dir)?;

        let bytes = self.codec.encode_value(result)?;
        let tmp_path = job_dir.join(format!("{RESULT_FILE}.tmp"));
        std::fs::write(&tmp_path, bytes)?;
        std::fs::rename(&tmp_path, &path)?;

        tracing::debug!(%jid, path = %path.display(), "cached job result");
        Ok(path)
    }

    /// Read a cached result. A job with no cached result is `Ok(None)`.
    pub fn load(&self, jid: &Jid) -> Result<Option<Value>, StoreError> {
        check_jid(jid)?;
        let bytes = match std::fs::read(self.result_path(jid)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(self.codec.decode_value(&bytes)?))
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod tests;
