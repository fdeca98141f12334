// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable record storage capability

use crate::error::StorageError;
use keeper_core::{HandoffSlot, ReplicationMeta};

/// Durable storage for one stream's live record and its handoff slots
///
/// `load_*` returns `Ok(None)` when nothing was ever written. `save_current`
/// must replace the previous record atomically: after a crash a later
/// `load_current` sees either the old or the new record, never a mix.
pub trait MetaStorage: Send + Sync {
    fn load_current(&self) -> Result<Option<ReplicationMeta>, StorageError>;

    fn save_current(&self, meta: &ReplicationMeta) -> Result<(), StorageError>;

    fn load_handoff(&self, slot: HandoffSlot) -> Result<Option<ReplicationMeta>, StorageError>;

    fn save_handoff(&self, slot: HandoffSlot, meta: &ReplicationMeta) -> Result<(), StorageError>;

    /// Clear a slot; clearing an empty slot succeeds
    fn remove_handoff(&self, slot: HandoffSlot) -> Result<(), StorageError>;
}
