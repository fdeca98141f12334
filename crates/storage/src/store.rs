// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordinate store for one replication stream
//!
//! `MetaStore` owns the published `ReplicationMeta` for a stream. Mutations
//! run under a per-store write lock: duplicate the published record, apply
//! the change, persist, then swap the new record in. Readers load the
//! published `Arc` without touching the lock, so they never block and never
//! see a half-built record.
//!
//! The store trusts the caller's event order and never retries a failed
//! write. A caller that times out around a call must `reload()` before
//! assuming anything about the outcome.

use crate::error::MetaStoreError;
use crate::storage::MetaStorage;
use arc_swap::ArcSwap;
use keeper_core::{
    Endpoint, HandoffSlot, MetaChange, ReplicationMeta, RunId, SnapshotStart, StreamId,
    DEFAULT_LOCAL_BEGIN_OFFSET,
};
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};

pub struct MetaStore<S: MetaStorage> {
    stream: StreamId,
    storage: S,
    current: ArcSwap<ReplicationMeta>,
    write_lock: Mutex<()>,
}

impl<S: MetaStorage> MetaStore<S> {
    /// Open the store, loading the persisted record or starting empty
    pub fn open(stream: StreamId, storage: S) -> Result<Self, MetaStoreError> {
        Self::open_starting_at(stream, storage, DEFAULT_LOCAL_BEGIN_OFFSET)
    }

    /// Open the store; a stream with no persisted record starts its local
    /// log at `local_begin_offset`
    pub fn open_starting_at(
        stream: StreamId,
        storage: S,
        local_begin_offset: i64,
    ) -> Result<Self, MetaStoreError> {
        let meta = Self::load_or_default(&stream, &storage, local_begin_offset)?;

        Ok(Self {
            stream,
            storage,
            current: ArcSwap::from_pointee(meta),
            write_lock: Mutex::new(()),
        })
    }

    fn load_or_default(
        stream: &StreamId,
        storage: &S,
        local_begin_offset: i64,
    ) -> Result<ReplicationMeta, MetaStoreError> {
        match storage.load_current()? {
            Some(meta) => {
                meta.validate()?;
                info!(%stream, %meta, "meta loaded");
                Ok(meta)
            }
            None => {
                let meta = ReplicationMeta::starting_at(local_begin_offset);
                meta.validate()?;
                info!(%stream, local_begin_offset, "no persisted meta, starting empty");
                Ok(meta)
            }
        }
    }

    /// Re-read durable state and publish it
    ///
    /// A stream with nothing persisted keeps its current in-memory record.
    pub fn reload(&self) -> Result<Arc<ReplicationMeta>, MetaStoreError> {
        let _guard = self.lock();
        if let Some(meta) = self.storage.load_current()? {
            meta.validate()?;
            info!(stream = %self.stream, %meta, "meta reloaded");
            self.current.store(Arc::new(meta));
        }
        Ok(self.current.load_full())
    }

    pub fn stream(&self) -> &StreamId {
        &self.stream
    }

    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    // Reads: lock-free against the published record

    /// The latest published record
    pub fn current(&self) -> Arc<ReplicationMeta> {
        self.current.load_full()
    }

    pub fn upstream_run_id(&self) -> Option<RunId> {
        self.current.load().upstream_run_id().cloned()
    }

    pub fn begin_offset(&self) -> Option<i64> {
        self.current.load().begin_offset()
    }

    pub fn local_begin_offset(&self) -> i64 {
        self.current.load().local_begin_offset()
    }

    pub fn upstream_address(&self) -> Option<Endpoint> {
        self.current.load().upstream_address().cloned()
    }

    /// Translate an upstream offset into the local offset space
    pub fn translate(&self, upstream_offset: i64) -> i64 {
        self.current.load().translate(upstream_offset)
    }

    /// Translate a local offset into the upstream offset space
    pub fn local_to_upstream(&self, local_offset: i64) -> Option<i64> {
        self.current.load().local_to_upstream(local_offset)
    }

    // Mutations

    pub fn set_upstream_address(&self, address: Endpoint) -> Result<(), MetaStoreError> {
        self.apply(MetaChange::UpstreamAddress { address })?;
        Ok(())
    }

    /// Record this keeper's run id
    ///
    /// A different previous run id is logged, not rejected.
    pub fn update_local_run_id(&self, run_id: RunId) -> Result<(), MetaStoreError> {
        let change = MetaChange::LocalRunId {
            run_id: run_id.clone(),
        };
        self.commit(change.name(), |current| {
            if let Some(previous) = current.local_run_id() {
                if previous != &run_id {
                    warn!(stream = %self.stream, %previous, new = %run_id, "local run id changed");
                }
            }
            Ok(current.apply(&change)?)
        })?;
        Ok(())
    }

    /// Record the start of a replication session
    pub fn begin_sync(
        &self,
        upstream_run_id: RunId,
        local_begin_offset: i64,
    ) -> Result<(), MetaStoreError> {
        self.apply(MetaChange::SyncBegun {
            upstream_run_id,
            local_begin_offset,
        })?;
        Ok(())
    }

    /// Record the start of a full snapshot transfer
    pub fn begin_snapshot(
        &self,
        start: SnapshotStart,
    ) -> Result<Arc<ReplicationMeta>, MetaStoreError> {
        self.apply(MetaChange::SnapshotBegun(start))
    }

    /// Record a finished snapshot ending at `upstream_offset`
    pub fn update_snapshot(
        &self,
        snapshot_file: impl Into<String>,
        snapshot_file_size: u64,
        upstream_offset: i64,
    ) -> Result<Arc<ReplicationMeta>, MetaStoreError> {
        let meta = self.apply(MetaChange::SnapshotUpdated {
            snapshot_file: snapshot_file.into(),
            snapshot_file_size,
            upstream_offset,
        })?;
        info!(
            stream = %self.stream,
            snapshot_last_local_offset = meta.snapshot_last_local_offset(),
            "snapshot updated"
        );
        Ok(meta)
    }

    /// Re-anchor the offset mapping after the upstream source switched
    ///
    /// `local_offset` and `upstream_offset` must name the same position.
    pub fn upstream_changed(
        &self,
        local_offset: i64,
        address: Endpoint,
        upstream_run_id: RunId,
        upstream_offset: i64,
    ) -> Result<(), MetaStoreError> {
        let meta = self.apply(MetaChange::UpstreamChanged {
            local_offset,
            address,
            upstream_run_id,
            upstream_offset,
        })?;
        info!(
            stream = %self.stream,
            local_offset,
            upstream_offset,
            begin_offset = ?meta.begin_offset(),
            "upstream changed"
        );
        Ok(())
    }

    // Handoff slots

    /// Write a frozen record into a handoff slot
    pub fn save_handoff(
        &self,
        slot: HandoffSlot,
        meta: &ReplicationMeta,
    ) -> Result<(), MetaStoreError> {
        meta.validate()?;
        self.storage
            .save_handoff(slot, meta)
            .map_err(MetaStoreError::PersistenceFailure)?;
        info!(stream = %self.stream, %slot, %meta, "handoff saved");
        Ok(())
    }

    /// Read a handoff slot, `None` if it was never written
    pub fn load_handoff(
        &self,
        slot: HandoffSlot,
    ) -> Result<Option<ReplicationMeta>, MetaStoreError> {
        let meta = self.storage.load_handoff(slot)?;
        if let Some(meta) = &meta {
            meta.validate()?;
        }
        Ok(meta)
    }

    fn apply(&self, change: MetaChange) -> Result<Arc<ReplicationMeta>, MetaStoreError> {
        self.commit(change.name(), |current| Ok(current.apply(&change)?))
    }

    /// Run one duplicate-mutate-persist-publish cycle under the write lock
    ///
    /// `mutate` sees the published record and returns its replacement.
    /// Nothing is published unless it returns `Ok` and the live record was
    /// persisted.
    pub(crate) fn commit<F>(
        &self,
        change: &'static str,
        mutate: F,
    ) -> Result<Arc<ReplicationMeta>, MetaStoreError>
    where
        F: FnOnce(&ReplicationMeta) -> Result<ReplicationMeta, MetaStoreError>,
    {
        self.commit_staged(change, |current| Ok((mutate(current)?, ())), |()| {})
    }

    /// [`commit`](Self::commit) for changes with side writes
    ///
    /// `stage` may write outside the live record inside the critical
    /// section and returns what `undo` needs to revert those writes. `undo`
    /// runs, still under the lock, only when persisting the live record
    /// fails.
    pub(crate) fn commit_staged<F, U, T>(
        &self,
        change: &'static str,
        stage: F,
        undo: U,
    ) -> Result<Arc<ReplicationMeta>, MetaStoreError>
    where
        F: FnOnce(&ReplicationMeta) -> Result<(ReplicationMeta, T), MetaStoreError>,
        U: FnOnce(T),
    {
        let _guard = self.lock();
        let old = self.current.load_full();
        let (new, staged) = stage(old.as_ref())?;

        if let Err(e) = self.storage.save_current(&new) {
            error!(stream = %self.stream, change, error = %e, "failed to persist meta");
            undo(staged);
            return Err(MetaStoreError::PersistenceFailure(e));
        }

        let new = Arc::new(new);
        self.current.store(Arc::clone(&new));
        info!(stream = %self.stream, change, old = %old, new = %new, "meta saved");
        Ok(new)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
