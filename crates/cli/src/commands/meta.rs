// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record inspection and upstream commands

use anyhow::Result;
use keeper_core::{Endpoint, RunId};

use super::Context;
use crate::error::KeeperctlError;

pub fn show(ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    println!("{}", serde_json::to_string_pretty(store.current().as_ref())?);
    Ok(())
}

pub fn translate(ctx: &Context, offset: i64, to_upstream: bool) -> Result<()> {
    let store = ctx.store()?;

    if !to_upstream {
        println!("{}", store.translate(offset));
        return Ok(());
    }

    match store.local_to_upstream(offset) {
        Some(upstream) => {
            println!("{}", upstream);
            Ok(())
        }
        None => Err(KeeperctlError::new(format!(
            "Stream '{}' has no upstream frame yet",
            ctx.stream
        ))
        .with_context("No sync or snapshot has established a begin offset")
        .into()),
    }
}

pub fn set_upstream(ctx: &Context, address: Endpoint) -> Result<()> {
    let store = ctx.store()?;
    store.set_upstream_address(address.clone())?;
    println!("Upstream for '{}' set to {}", ctx.stream, address);
    Ok(())
}

pub fn rotate_run_id(ctx: &Context, run_id: Option<RunId>) -> Result<()> {
    let store = ctx.store()?;
    let run_id = run_id.unwrap_or_else(RunId::generate);
    store.update_local_run_id(run_id.clone())?;
    println!("Local run id for '{}' set to {}", ctx.stream, run_id);
    Ok(())
}
