// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use anyhow::Result;

use super::Context;

pub fn list(ctx: &Context) -> Result<()> {
    let streams = ctx.stores.list_persisted()?;
    if streams.is_empty() {
        println!("No streams");
        return Ok(());
    }
    for stream in streams {
        println!("{}", stream);
    }
    Ok(())
}
