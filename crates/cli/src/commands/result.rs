// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `minion result` - cached job results

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use minion_core::{HostConfig, Jid};
use minion_storage::ResultCache;
use serde_json::Value;

use crate::exit_error::ExitError;
use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct ResultArgs {
    #[command(subcommand)]
    pub command: ResultCommand,
}

#[derive(Subcommand)]
pub enum ResultCommand {
    /// Cache a job's result (JSON from a file or stdin)
    Put {
        /// Job ID
        jid: String,

        /// Read the result from this file instead of stdin
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },
    /// Print a job's cached result
    Show {
        /// Job ID
        jid: String,
    },
}

pub fn handle(config: &HostConfig, args: ResultArgs, format: OutputFormat) -> Result<()> {
    let cache = ResultCache::from_config(config);
    match args.command {
        ResultCommand::Put { jid, file } => {
            let jid = Jid::new(jid);
            let text = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut text = String::new();
                    std::io::stdin()
                        .read_to_string(&mut text)
                        .context("failed to read stdin")?;
                    text
                }
            };
            let value: Value = serde_json::from_str(&text).context("result is not valid JSON")?;
            let path = cache.persist(&jid, &value)?;

            match format {
                OutputFormat::Text => println!("Cached result for {} at {}", jid, path.display()),
                OutputFormat::Json => {
                    print_json(&serde_json::json!({ "jid": jid, "path": path }))?;
                }
            }
        }
        ResultCommand::Show { jid } => {
            let jid = Jid::new(jid);
            let Some(value) = cache.load(&jid)? else {
                let message = format!("No cached result for job {jid}");
                return Err(ExitError::not_found(message).into());
            };
            print_json(&value)?;
        }
    }
    Ok(())
}
