// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `minion config` - show the resolved host configuration

use std::path::PathBuf;

use anyhow::Result;
use minion_core::HostConfig;
use serde::Serialize;

use crate::output::{print_json, OutputFormat};

#[derive(Serialize)]
struct ConfigView {
    cache_dir: PathBuf,
    proc_dir: PathBuf,
    jobs_dir: PathBuf,
    mode: String,
    cmdline_token: String,
    proc_root: PathBuf,
}

impl From<&HostConfig> for ConfigView {
    fn from(config: &HostConfig) -> Self {
        Self {
            cache_dir: config.cache_dir.clone(),
            proc_dir: config.proc_dir(),
            jobs_dir: config.jobs_dir(),
            mode: config.mode().to_string(),
            cmdline_token: config.cmdline_token.clone(),
            proc_root: config.proc_root.clone(),
        }
    }
}

pub fn handle(config: &HostConfig, format: OutputFormat) -> Result<()> {
    let view = ConfigView::from(config);
    match format {
        OutputFormat::Text => {
            println!("cache_dir:     {}", view.cache_dir.display());
            println!("proc_dir:      {}", view.proc_dir.display());
            println!("jobs_dir:      {}", view.jobs_dir.display());
            println!("mode:          {}", view.mode);
            println!("cmdline_token: {}", view.cmdline_token);
            println!("proc_root:     {}", view.proc_root.display());
        }
        OutputFormat::Json => print_json(&view)?,
    }
    Ok(())
}
