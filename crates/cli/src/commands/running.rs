// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `minion running` - list jobs running on this host

use anyhow::Result;
use minion_core::{ExecContext, ExecutionMode, HostConfig, ThreadRegistry};
use minion_storage::RecordStore;

use crate::output::{format_running, print_json, OutputFormat};

pub fn handle(config: &HostConfig, format: OutputFormat) -> Result<()> {
    let store = RecordStore::from_config(config);
    let ctx = observer_context();
    let records = store.running(&ctx)?;

    match format {
        OutputFormat::Text => print!("{}", format_running(&records)),
        OutputFormat::Json => print_json(&records)?,
    }
    Ok(())
}

/// Context for an outside observer.
///
/// The CLI never owns a job, so it classifies as a separate process even on
/// threaded hosts. Classifying as threaded would treat every record written
/// by the host process as foreign and delete it.
fn observer_context() -> ExecContext {
    ExecContext::capture(ExecutionMode::Multiprocessing, &ThreadRegistry::new())
}
