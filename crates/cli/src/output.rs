// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use minion_core::JobRecord;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render running jobs as aligned `JID  PID  FUNCTION` rows, sorted by jid.
pub fn format_running(records: &[JobRecord]) -> String {
    if records.is_empty() {
        return "No running jobs\n".to_string();
    }

    let mut rows: Vec<(&str, String, &str)> = records
        .iter()
        .map(|r| {
            let fun = r.field("fun").and_then(|v| v.as_str()).unwrap_or("-");
            (r.jid.as_str(), r.pid.to_string(), fun)
        })
        .collect();
    rows.sort();

    let jid_width = rows
        .iter()
        .map(|r| r.0.len())
        .max()
        .unwrap_or(0)
        .max("JID".len());
    let pid_width = rows
        .iter()
        .map(|r| r.1.len())
        .max()
        .unwrap_or(0)
        .max("PID".len());

    let mut out = format!("{:<jid_width$}  {:<pid_width$}  FUNCTION\n", "JID", "PID");
    for (jid, pid, fun) in rows {
        out.push_str(&format!("{jid:<jid_width$}  {pid:<pid_width$}  {fun}\n"));
    }
    out
}

/// Print a value as pretty JSON.
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
