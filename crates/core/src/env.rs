// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Resolve cache directory: MINION_CACHE_DIR > XDG_CACHE_HOME/minion > ~/.cache/minion
pub fn cache_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = cache_dir_override() {
        return Ok(dir);
    }
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        return Ok(PathBuf::from(xdg).join("minion"));
    }
    let home = std::env::var("HOME").map_err(|_| ConfigError::NoCacheDir)?;
    Ok(PathBuf::from(home).join(".cache/minion"))
}

/// Explicit cache directory, overriding the config file.
pub fn cache_dir_override() -> Option<PathBuf> {
    non_empty("MINION_CACHE_DIR").map(PathBuf::from)
}

/// Path to a TOML config file.
pub fn config_file() -> Option<PathBuf> {
    non_empty("MINION_CONFIG").map(PathBuf::from)
}

/// Execution mode override (`MINION_MULTIPROCESSING`).
pub fn multiprocessing() -> Result<Option<bool>, ConfigError> {
    const VAR: &str = "MINION_MULTIPROCESSING";
    let Ok(value) = std::env::var(VAR) else {
        return Ok(None);
    };
    parse_bool(&value)
        .map(Some)
        .ok_or(ConfigError::InvalidBool { var: VAR, value })
}

/// Command-line token override (`MINION_CMDLINE_TOKEN`).
pub fn cmdline_token() -> Option<String> {
    non_empty("MINION_CMDLINE_TOKEN")
}

/// procfs mount point override (`MINION_PROC_ROOT`).
pub fn proc_root() -> Option<PathBuf> {
    non_empty("MINION_PROC_ROOT").map(PathBuf::from)
}

/// Value of `var`, treating unset and empty the same.
fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
