// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record classification.
//!
//! [`classify`] decides, from the raw bytes of one record and the caller's
//! [`ExecContext`], whether the record describes a job that is still running.
//! It performs no filesystem writes; the store applies the verdict.

use minion_core::{ExecContext, ExecutionMode, JobRecord, ProcessProbe, RecordCodec};

/// Outcome of classifying one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Another job, still running.
    Valid(JobRecord),
    /// Not reported, but left on disk.
    Keep(KeepReason),
    /// The job is gone; the record must be deleted.
    Stale(StaleReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepReason {
    /// Payload did not decode to a record. May be a concurrent partial write.
    Undecodable,
    /// Multiprocessing mode and the record belongs to the calling process.
    OwnProcess,
    /// Threaded mode and the record belongs to the calling thread.
    OwnThread,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    Empty,
    ProcessDead,
    /// Threaded mode and the record was written by another process.
    ForeignProcess,
    /// Threaded mode and no live thread carries the record's jid.
    ThreadGone,
    /// The pid is alive but now belongs to an unrelated program.
    CmdlineMismatch,
}

minion_core::simple_display! {
    KeepReason {
        Undecodable => "undecodable",
        OwnProcess => "own process",
        OwnThread => "own thread",
    }
}

minion_core::simple_display! {
    StaleReason {
        Empty => "empty record",
        ProcessDead => "process not running",
        ForeignProcess => "written by another process",
        ThreadGone => "job thread exited",
        CmdlineMismatch => "pid reused by another program",
    }
}

impl Verdict {
    pub fn is_stale(&self) -> bool {
        matches!(self, Verdict::Stale(_))
    }

    pub fn into_record(self) -> Option<JobRecord> {
        match self {
            Verdict::Valid(record) => Some(record),
            _ => None,
        }
    }
}

/// Classify the raw contents of a record file.
///
/// Checks run in a fixed order and the first failing check decides:
/// empty content, decode, pid liveness, execution-mode ownership, then
/// command-line identity.
pub fn classify(
    bytes: &[u8],
    ctx: &ExecContext,
    codec: &impl RecordCodec,
    probe: &impl ProcessProbe,
    cmdline_token: &str,
) -> Verdict {
    if bytes.is_empty() {
        return Verdict::Stale(StaleReason::Empty);
    }

    // Undecodable records are left alone while empty ones are deleted:
    // a half-written payload must not be destroyed under its writer.
    let record = match codec.decode(bytes) {
        Ok(record) => record,
        Err(e) => {
            tracing::debug!(error = %e, "leaving undecodable record in place");
            return Verdict::Keep(KeepReason::Undecodable);
        }
    };

    if !probe.is_alive(record.pid) {
        return Verdict::Stale(StaleReason::ProcessDead);
    }

    match ctx.mode {
        ExecutionMode::Multiprocessing => {
            if record.pid == ctx.pid {
                return Verdict::Keep(KeepReason::OwnProcess);
            }
        }
        ExecutionMode::Threaded => {
            if record.pid != ctx.pid {
                return Verdict::Stale(StaleReason::ForeignProcess);
            }
            if ctx.is_own_thread(record.jid.as_str()) {
                return Verdict::Keep(KeepReason::OwnThread);
            }
            if !ctx.has_live_thread(record.jid.as_str()) {
                return Verdict::Stale(StaleReason::ThreadGone);
            }
        }
    }

    if !probe.cmdline_contains(record.pid, cmdline_token) {
        return Verdict::Stale(StaleReason::CmdlineMismatch);
    }

    Verdict::Valid(record)
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
