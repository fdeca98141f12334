// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Keeper roles and handoff slots
//!
//! A keeper is either `Active` (attached to the upstream source) or
//! `Backup` (attached behind another keeper). The only transitions are
//! `Active -> Backup` and `Backup -> Active`; deciding *when* to switch
//! belongs to the control plane.

use crate::error::MetaError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeeperRole {
    Active,
    Backup,
}

impl KeeperRole {
    /// Validate a transition and return the new role
    pub fn transition(self, to: KeeperRole) -> Result<KeeperRole, MetaError> {
        match (self, to) {
            (KeeperRole::Active, KeeperRole::Backup) | (KeeperRole::Backup, KeeperRole::Active) => {
                Ok(to)
            }
            _ => Err(MetaError::InvalidRoleTransition { from: self, to }),
        }
    }
}

impl fmt::Display for KeeperRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeeperRole::Active => write!(f, "active"),
            KeeperRole::Backup => write!(f, "backup"),
        }
    }
}

/// Named slots for frozen coordinate records exchanged between keepers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandoffSlot {
    /// Frame last used by the keeper that left the active role
    FromActive,
}

impl HandoffSlot {
    pub fn name(self) -> &'static str {
        match self {
            HandoffSlot::FromActive => "from-active",
        }
    }

    /// File name the slot is persisted under
    pub fn file_name(self) -> &'static str {
        match self {
            HandoffSlot::FromActive => "handoff-from-active.json",
        }
    }
}

impl fmt::Display for HandoffSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
#[path = "role_tests.rs"]
mod tests;
