// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-stream store registry
//!
//! One `MetaStore` per stream, each with its own write lock, so mutations on
//! different streams never contend. The registry lock is only taken to find
//! or open a store.

use crate::error::{MetaStoreError, StorageError};
use crate::file::FileMetaStorage;
use crate::store::MetaStore;
use keeper_core::{KeeperConfig, StreamId, META_FILE};
use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Mutex};

pub struct MetaStores {
    config: KeeperConfig,
    stores: Mutex<HashMap<StreamId, Arc<MetaStore<FileMetaStorage>>>>,
}

impl MetaStores {
    pub fn new(config: KeeperConfig) -> Self {
        Self {
            config,
            stores: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &KeeperConfig {
        &self.config
    }

    /// Get the store for `stream`, opening it on first use
    pub fn open(
        &self,
        stream: &StreamId,
    ) -> Result<Arc<MetaStore<FileMetaStorage>>, MetaStoreError> {
        let mut stores = self.stores.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(store) = stores.get(stream) {
            return Ok(Arc::clone(store));
        }

        let storage = FileMetaStorage::for_stream(&self.config, stream);
        let store = Arc::new(MetaStore::open_starting_at(
            stream.clone(),
            storage,
            self.config.local_begin_offset,
        )?);
        stores.insert(stream.clone(), Arc::clone(&store));
        Ok(store)
    }

    /// Streams with a persisted live record under the data directory
    pub fn list_persisted(&self) -> Result<Vec<StreamId>, StorageError> {
        let dir = &self.config.data_dir;
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut streams = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.path().join(META_FILE).is_file() {
                continue;
            }
            match StreamId::new(entry.file_name().to_string_lossy().to_string()) {
                Ok(stream) => streams.push(stream),
                Err(e) => tracing::warn!(error = %e, "skipping directory with invalid stream name"),
            }
        }
        streams.sort();
        Ok(streams)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
