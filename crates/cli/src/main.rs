// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `minion` - inspect jobs tracked on this host

mod commands;
mod exit_error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use minion_core::HostConfig;
use tracing_subscriber::EnvFilter;

use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "minion", version, about = "Inspect jobs running on this host")]
struct Cli {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List jobs currently running on this host (removes stale records)
    Running,
    /// Cached job results
    Result(commands::result::ResultArgs),
    /// Show the resolved host configuration
    Config,
}

fn main() {
    init_tracing();

    if let Err(e) = run(Cli::parse()) {
        if let Some(exit) = e.downcast_ref::<ExitError>() {
            if !exit.message.is_empty() {
                eprintln!("{}", exit.message);
            }
            std::process::exit(exit.code);
        }
        eprintln!("Error: {e:#}");
        std::process::exit(3);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = HostConfig::load()?;
    tracing::debug!(
        cache_dir = %config.cache_dir.display(),
        mode = %config.mode(),
        "loaded config"
    );

    match cli.command {
        Commands::Running => commands::running::handle(&config, cli.output),
        Commands::Result(args) => commands::result::handle(&config, args, cli.output),
        Commands::Config => commands::config::handle(&config, cli.output),
    }
}

/// Log to stderr so stdout stays parseable. Filter via `MINION_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("MINION_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
