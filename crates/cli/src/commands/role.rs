// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Role transition commands

use anyhow::Result;
use keeper_core::{HandoffSlot, KeeperRole, ReplicationMeta};
use keeper_storage::{MetaStorage, MetaStoreError};

use super::Context;
use crate::error::KeeperctlError;

pub fn become_backup(ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let meta = store.become_backup()?;
    print_role(ctx, KeeperRole::Backup, &meta);
    Ok(())
}

pub fn become_active(ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    match store.become_active() {
        Ok(meta) => {
            print_role(ctx, KeeperRole::Active, &meta);
            Ok(())
        }
        Err(MetaStoreError::MissingHandoffRecord { slot }) => {
            let path = ctx.storage().handoff_path(slot);
            Err(KeeperctlError::missing_handoff(&ctx.stream, &path).into())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn show_handoff(ctx: &Context) -> Result<()> {
    let storage = ctx.storage();
    match storage.load_handoff(HandoffSlot::FromActive)? {
        Some(meta) => println!("{}", serde_json::to_string_pretty(&meta)?),
        None => println!("No handoff record for stream '{}'", ctx.stream),
    }
    Ok(())
}

fn print_role(ctx: &Context, role: KeeperRole, meta: &ReplicationMeta) {
    println!("Stream '{}' is now {}", ctx.stream, role);
    println!("  {}", meta);
}
