// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use minion_core::CodecError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the record store and result cache.
///
/// Stale records, undecodable records and entries that vanish mid-read are
/// not errors; they resolve to "no record".
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The store root exists but cannot be listed (permission denied, symlink loop).
    #[error("cannot read record store {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("invalid job id {0:?}")]
    InvalidJid(String),
}
