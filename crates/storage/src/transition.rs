// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Active/backup role transitions
//!
//! The active keeper, the backup keeper and the upstream source each have
//! their own offset space, fixed by (`begin_offset`, `local_begin_offset`).
//! A role swap hands the active keeper's frame to the keeper taking over,
//! so replicas and backups already synced in that frame continue without a
//! gap or a duplicate:
//!
//! 1. Outgoing keeper `become_backup()`: freeze its record into
//!    `HandoffSlot::FromActive`, then collapse `begin_offset` onto its own
//!    local frame. A failed live write restores the slot.
//! 2. Incoming keeper `become_active()`: inherit the frozen frame from the
//!    slot. No slot means there is no safe starting point and the call
//!    fails with `MissingHandoffRecord`.

use crate::error::MetaStoreError;
use crate::storage::MetaStorage;
use crate::store::MetaStore;
use keeper_core::{HandoffSlot, KeeperRole, MetaChange, ReplicationMeta};
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};

impl<S: MetaStorage> MetaStore<S> {
    /// Hand the current frame off and make the local log self-referential
    ///
    /// If the live record cannot be persisted the slot is put back the way
    /// it was, so no peer can inherit the frame of a keeper that is still
    /// active.
    pub fn become_backup(&self) -> Result<Arc<ReplicationMeta>, MetaStoreError> {
        info!(stream = %self.stream(), "becoming backup");
        let change = MetaChange::BecameBackup;
        let slot = HandoffSlot::FromActive;

        self.commit_staged(
            change.name(),
            |current| {
                let next = current.apply(&change)?;
                let previous = match self.storage().load_handoff(slot) {
                    Ok(previous) => previous,
                    // Overwritten below; nothing worth restoring
                    Err(e) if e.is_corrupt() => {
                        warn!(
                            stream = %self.stream(),
                            %slot,
                            error = %e,
                            "replacing unreadable handoff"
                        );
                        None
                    }
                    Err(e) => return Err(MetaStoreError::PersistenceFailure(e)),
                };
                self.storage()
                    .save_handoff(slot, current)
                    .map_err(MetaStoreError::PersistenceFailure)?;
                Ok((next, previous))
            },
            |previous| self.restore_handoff(slot, previous),
        )
    }

    fn restore_handoff(&self, slot: HandoffSlot, previous: Option<ReplicationMeta>) {
        let restored = match &previous {
            Some(meta) => self.storage().save_handoff(slot, meta),
            None => self.storage().remove_handoff(slot),
        };
        match restored {
            Ok(()) => info!(stream = %self.stream(), %slot, "handoff rolled back"),
            Err(e) => error!(
                stream = %self.stream(),
                %slot,
                error = %e,
                "failed to roll back handoff, slot holds the frame of a keeper that is still active"
            ),
        }
    }

    /// Inherit the frame left by the previously active keeper
    pub fn become_active(&self) -> Result<Arc<ReplicationMeta>, MetaStoreError> {
        info!(stream = %self.stream(), "becoming active");
        let slot = HandoffSlot::FromActive;

        self.commit("became_active", |current| {
            let handoff = self
                .load_handoff(slot)?
                .ok_or(MetaStoreError::MissingHandoffRecord { slot })?;
            info!(
                stream = %self.stream(),
                %handoff,
                frame_changed = !current.same_frame(&handoff),
                "inheriting handoff frame"
            );
            Ok(current.apply(&MetaChange::BecameActive {
                handoff: Box::new(handoff),
            })?)
        })
    }
}

/// Tracks a keeper's role and drives the matching store transition
///
/// The role only changes when the store transition committed.
pub struct RoleEngine<S: MetaStorage> {
    store: Arc<MetaStore<S>>,
    role: Mutex<KeeperRole>,
}

impl<S: MetaStorage> RoleEngine<S> {
    pub fn new(store: Arc<MetaStore<S>>, role: KeeperRole) -> Self {
        Self {
            store,
            role: Mutex::new(role),
        }
    }

    pub fn role(&self) -> KeeperRole {
        *self.role.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn store(&self) -> &Arc<MetaStore<S>> {
        &self.store
    }

    pub fn become_backup(&self) -> Result<Arc<ReplicationMeta>, MetaStoreError> {
        self.transition(KeeperRole::Backup)
    }

    pub fn become_active(&self) -> Result<Arc<ReplicationMeta>, MetaStoreError> {
        self.transition(KeeperRole::Active)
    }

    fn transition(&self, to: KeeperRole) -> Result<Arc<ReplicationMeta>, MetaStoreError> {
        let mut role = self.role.lock().unwrap_or_else(|e| e.into_inner());
        let from = *role;
        let next = from.transition(to)?;

        let meta = match next {
            KeeperRole::Backup => self.store.become_backup()?,
            KeeperRole::Active => self.store.become_active()?,
        };

        *role = next;
        info!(stream = %self.store.stream(), %from, to = %next, "role changed");
        Ok(meta)
    }
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
