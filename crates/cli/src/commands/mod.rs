// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! keeperctl subcommands

pub mod meta;
pub mod role;
pub mod streams;

use anyhow::Result;
use keeper_core::StreamId;
use keeper_storage::{FileMetaStorage, MetaStore, MetaStores};
use std::sync::Arc;

/// What every subcommand operates on
pub struct Context {
    pub stores: MetaStores,
    pub stream: StreamId,
}

impl Context {
    pub fn store(&self) -> Result<Arc<MetaStore<FileMetaStorage>>> {
        Ok(self.stores.open(&self.stream)?)
    }

    pub fn storage(&self) -> FileMetaStorage {
        FileMetaStorage::for_stream(self.stores.config(), &self.stream)
    }
}
