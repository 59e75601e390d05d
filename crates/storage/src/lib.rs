// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! minion-storage: the on-disk job record store.
//!
//! Every read of the store is also a garbage-collection pass: records whose
//! job is no longer running are deleted the first time a reader notices.
//! There is no locking. Concurrent readers may race to delete the same stale
//! record and a missing file is never an error.

mod error;
mod results;
mod store;
mod validate;

pub use error::StoreError;
pub use results::{ResultCache, RESULT_FILE};
pub use store::{RecordStore, TMP_GRACE};
pub use validate::{classify, KeepReason, StaleReason, Verdict};
