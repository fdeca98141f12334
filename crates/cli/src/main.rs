// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! keeperctl - operate keeper replication coordinates

#![cfg_attr(test, allow(clippy::unwrap_used))]

mod commands;
mod error;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{meta, role, streams, Context};
use keeper_core::{Endpoint, KeeperConfig, RunId, StreamId};
use keeper_storage::MetaStores;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::error::KeeperctlError;

#[derive(Parser)]
#[command(
    name = "keeperctl",
    version,
    about = "Inspect and operate keeper replication coordinates"
)]
struct Cli {
    /// Keeper config file (TOML)
    #[arg(long, global = true, conflicts_with = "data_dir")]
    config: Option<PathBuf>,

    /// Data directory holding one subdirectory per stream
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory where handoff records are exchanged
    #[arg(long, global = true)]
    handoff_dir: Option<PathBuf>,

    /// Replication stream to operate on
    #[arg(long, global = true, default_value = "default")]
    stream: StreamId,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current coordinate record
    Show,
    /// List streams with a persisted record
    Streams,
    /// Translate an upstream offset to the local offset space
    Translate {
        offset: i64,
        /// Translate a local offset to the upstream offset space instead
        #[arg(long)]
        to_upstream: bool,
    },
    /// Point the stream at a new upstream address
    SetUpstream {
        /// Upstream address (host:port)
        address: Endpoint,
    },
    /// Give this keeper a new local run id
    RotateRunId {
        /// Run id to use instead of a generated one
        run_id: Option<RunId>,
    },
    /// Hand the current frame off and switch to the backup role
    BecomeBackup,
    /// Inherit the frame of the previous active keeper
    BecomeActive,
    /// Print the handoff record left by the previous active keeper
    Handoff,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<KeeperctlError>() {
                Some(err) => eprint!("{}", err),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    if let Err(e) = setup_logging(&config) {
        eprintln!("warning: logging disabled: {:#}", e);
    }

    let ctx = Context {
        stores: MetaStores::new(config),
        stream: cli.stream,
    };
    tracing::debug!(
        stream = %ctx.stream,
        data_dir = %ctx.stores.config().data_dir.display(),
        "running command"
    );

    match cli.command {
        Commands::Show => meta::show(&ctx),
        Commands::Streams => streams::list(&ctx),
        Commands::Translate {
            offset,
            to_upstream,
        } => meta::translate(&ctx, offset, to_upstream),
        Commands::SetUpstream { address } => meta::set_upstream(&ctx, address),
        Commands::RotateRunId { run_id } => meta::rotate_run_id(&ctx, run_id),
        Commands::BecomeBackup => role::become_backup(&ctx),
        Commands::BecomeActive => role::become_active(&ctx),
        Commands::Handoff => role::show_handoff(&ctx),
    }
}

fn load_config(cli: &Cli) -> Result<KeeperConfig> {
    let config = match (&cli.config, &cli.data_dir) {
        (Some(path), _) => KeeperConfig::load(path)?,
        (None, Some(dir)) => KeeperConfig::for_data_dir(dir),
        (None, None) => return Err(KeeperctlError::no_data_dir().into()),
    };

    Ok(match &cli.handoff_dir {
        Some(dir) => config.with_handoff_dir(dir.clone()),
        None => config,
    })
}

/// Log to stderr; `RUST_LOG` wins over the configured filter
fn setup_logging(config: &KeeperConfig) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.log_filter.as_deref().unwrap_or("warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}
