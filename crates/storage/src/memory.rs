// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory storage with call recording and failure injection
//!
//! Handoff slots live in a separate shared area so two stores can model two
//! keepers exchanging a handoff record (see [`MemoryMetaStorage::peer`]).

use crate::error::StorageError;
use crate::storage::MetaStorage;
use keeper_core::{HandoffSlot, ReplicationMeta};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Recorded call to a storage method
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageCall {
    LoadCurrent,
    SaveCurrent { meta: ReplicationMeta },
    LoadHandoff { slot: HandoffSlot },
    SaveHandoff { slot: HandoffSlot, meta: ReplicationMeta },
    RemoveHandoff { slot: HandoffSlot },
}

#[derive(Default)]
struct MemoryState {
    current: Option<ReplicationMeta>,
    calls: Vec<StorageCall>,
    // Configurable failure modes
    fail_reads: bool,
    fail_current_writes: bool,
    fail_handoff_writes: bool,
}

#[derive(Clone, Default)]
pub struct MemoryMetaStorage {
    state: Arc<Mutex<MemoryState>>,
    handoff: Arc<Mutex<HashMap<HandoffSlot, ReplicationMeta>>>,
}

impl MemoryMetaStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with a live record
    pub fn with_current(meta: ReplicationMeta) -> Self {
        let storage = Self::new();
        storage.lock_state().current = Some(meta);
        storage
    }

    /// Separate live record, same handoff area
    pub fn peer(&self) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState::default())),
            handoff: Arc::clone(&self.handoff),
        }
    }

    /// Last record written with `save_current`
    pub fn stored_current(&self) -> Option<ReplicationMeta> {
        self.lock_state().current.clone()
    }

    pub fn stored_handoff(&self, slot: HandoffSlot) -> Option<ReplicationMeta> {
        self.lock_handoff().get(&slot).cloned()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StorageCall> {
        self.lock_state().calls.clone()
    }

    /// Number of successful and failed `save_current` calls
    pub fn current_writes(&self) -> usize {
        self.lock_state()
            .calls
            .iter()
            .filter(|c| matches!(c, StorageCall::SaveCurrent { .. }))
            .count()
    }

    pub fn set_fail_reads(&self, fails: bool) {
        self.lock_state().fail_reads = fails;
    }

    pub fn set_fail_current_writes(&self, fails: bool) {
        self.lock_state().fail_current_writes = fails;
    }

    pub fn set_fail_handoff_writes(&self, fails: bool) {
        self.lock_state().fail_handoff_writes = fails;
    }

    fn lock_state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_handoff(&self) -> MutexGuard<'_, HashMap<HandoffSlot, ReplicationMeta>> {
        self.handoff.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl MetaStorage for MemoryMetaStorage {
    fn load_current(&self) -> Result<Option<ReplicationMeta>, StorageError> {
        let mut state = self.lock_state();
        state.calls.push(StorageCall::LoadCurrent);
        if state.fail_reads {
            return Err(StorageError::Injected("read"));
        }
        Ok(state.current.clone())
    }

    fn save_current(&self, meta: &ReplicationMeta) -> Result<(), StorageError> {
        let mut state = self.lock_state();
        state.calls.push(StorageCall::SaveCurrent { meta: meta.clone() });
        if state.fail_current_writes {
            return Err(StorageError::Injected("write current"));
        }
        state.current = Some(meta.clone());
        Ok(())
    }

    fn load_handoff(&self, slot: HandoffSlot) -> Result<Option<ReplicationMeta>, StorageError> {
        {
            let mut state = self.lock_state();
            state.calls.push(StorageCall::LoadHandoff { slot });
            if state.fail_reads {
                return Err(StorageError::Injected("read"));
            }
        }
        Ok(self.lock_handoff().get(&slot).cloned())
    }

    fn save_handoff(&self, slot: HandoffSlot, meta: &ReplicationMeta) -> Result<(), StorageError> {
        {
            let mut state = self.lock_state();
            state.calls.push(StorageCall::SaveHandoff {
                slot,
                meta: meta.clone(),
            });
            if state.fail_handoff_writes {
                return Err(StorageError::Injected("write handoff"));
            }
        }
        self.lock_handoff().insert(slot, meta.clone());
        Ok(())
    }

    fn remove_handoff(&self, slot: HandoffSlot) -> Result<(), StorageError> {
        {
            let mut state = self.lock_state();
            state.calls.push(StorageCall::RemoveHandoff { slot });
            if state.fail_handoff_writes {
                return Err(StorageError::Injected("remove handoff"));
            }
        }
        self.lock_handoff().remove(&slot);
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
