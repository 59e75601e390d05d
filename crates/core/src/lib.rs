// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! minion-core: job records, host configuration and process introspection
//! shared by the minion job tracker.

pub mod macros;

pub mod codec;
pub mod config;
pub mod context;
pub mod env;
pub mod probe;
pub mod record;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use codec::{CodecError, JsonCodec, RecordCodec};
pub use config::{ConfigError, ExecutionMode, HostConfig, DEFAULT_CMDLINE_TOKEN};
pub use context::{ExecContext, Registration, ThreadRegistry};
#[cfg(any(test, feature = "test-support"))]
pub use probe::FakeProbe;
pub use probe::{ProcessProbe, SystemProbe};
pub use record::{Jid, JobRecord};
#[cfg(any(test, feature = "test-support"))]
pub use test_support::JobRecordBuilder;
