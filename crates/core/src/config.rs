// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host configuration: where records live and how jobs execute.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default substring expected in a live job process's command line.
pub const DEFAULT_CMDLINE_TOKEN: &str = "minion";

/// Directory (under the cache dir) holding one liveness record per job.
pub const PROC_DIR: &str = "proc";

/// Directory (under the cache dir) holding persisted job results.
pub const JOBS_DIR: &str = "minion_jobs";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine cache directory (set MINION_CACHE_DIR or HOME)")]
    NoCacheDir,
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {var}: {value:?} (expected true/false)")]
    InvalidBool { var: &'static str, value: String },
}

/// How the host runs jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Each job runs in its own OS process.
    Multiprocessing,
    /// All jobs run as named threads of one process.
    Threaded,
}

crate::simple_display! {
    ExecutionMode {
        Multiprocessing => "multiprocessing",
        Threaded => "threaded",
    }
}

/// Resolved host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub cache_dir: PathBuf,
    pub multiprocessing: bool,
    pub cmdline_token: String,
    pub proc_root: PathBuf,
}

/// On-disk `minion.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    cache_dir: Option<PathBuf>,
    multiprocessing: Option<bool>,
    cmdline_token: Option<String>,
    proc_root: Option<PathBuf>,
}

impl HostConfig {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            multiprocessing: true,
            cmdline_token: DEFAULT_CMDLINE_TOKEN.to_string(),
            proc_root: PathBuf::from("/proc"),
        }
    }

    /// Load configuration for this host.
    ///
    /// Defaults, then the TOML file (`MINION_CONFIG`, or `minion.toml` in the
    /// default cache dir when present), then `MINION_*` environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::new(crate::env::cache_dir()?);

        let file = match crate::env::config_file() {
            Some(path) => Some(path),
            None => Some(config.cache_dir.join("minion.toml")).filter(|p| p.is_file()),
        };
        if let Some(path) = file {
            config.merge_file(&path)?;
        }

        if let Some(dir) = crate::env::cache_dir_override() {
            config.cache_dir = dir;
        }
        if let Some(multiprocessing) = crate::env::multiprocessing()? {
            config.multiprocessing = multiprocessing;
        }
        if let Some(token) = crate::env::cmdline_token() {
            config.cmdline_token = token;
        }
        if let Some(root) = crate::env::proc_root() {
            config.proc_root = root;
        }
        Ok(config)
    }

    /// Overlay values from a TOML file onto this configuration.
    pub fn merge_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        self.merge_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn merge_toml(&mut self, text: &str) -> Result<(), toml::de::Error> {
        let file: FileConfig = toml::from_str(text)?;
        if let Some(dir) = file.cache_dir {
            self.cache_dir = dir;
        }
        if let Some(multiprocessing) = file.multiprocessing {
            self.multiprocessing = multiprocessing;
        }
        if let Some(token) = file.cmdline_token {
            self.cmdline_token = token;
        }
        if let Some(root) = file.proc_root {
            self.proc_root = root;
        }
        Ok(())
    }

    crate::setters! {
        into {
            cmdline_token: String,
            proc_root: PathBuf,
        }
        set {
            multiprocessing: bool,
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        if self.multiprocessing {
            ExecutionMode::Multiprocessing
        } else {
            ExecutionMode::Threaded
        }
    }

    /// `<cache_dir>/proc`, one record file per running job.
    pub fn proc_dir(&self) -> PathBuf {
        self.cache_dir.join(PROC_DIR)
    }

    /// `<cache_dir>/minion_jobs`, one directory per cached job result.
    pub fn jobs_dir(&self) -> PathBuf {
        self.cache_dir.join(JOBS_DIR)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
