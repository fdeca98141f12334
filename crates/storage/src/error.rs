// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage and store errors

use keeper_core::{HandoffSlot, KeeperRole, MetaError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from a `MetaStorage` backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("corrupt record at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported record version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("injected failure: {0}")]
    Injected(&'static str),
}

impl StorageError {
    /// Whether the stored bytes were readable but not a valid record
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            StorageError::Corrupt { .. } | StorageError::UnsupportedVersion { .. }
        )
    }
}

/// Errors from `MetaStore` and `RoleEngine` operations
#[derive(Debug, Error)]
pub enum MetaStoreError {
    #[error("persistence failure: {0}")]
    PersistenceFailure(#[source] StorageError),
    #[error("missing handoff record '{slot}'")]
    MissingHandoffRecord { slot: HandoffSlot },
    #[error("invalid record state: {0}")]
    InvalidRecordState(String),
    #[error("invalid role transition: {from} -> {to}")]
    InvalidRoleTransition { from: KeeperRole, to: KeeperRole },
}

impl From<StorageError> for MetaStoreError {
    fn from(err: StorageError) -> Self {
        if err.is_corrupt() {
            MetaStoreError::InvalidRecordState(err.to_string())
        } else {
            MetaStoreError::PersistenceFailure(err)
        }
    }
}

impl From<MetaError> for MetaStoreError {
    fn from(err: MetaError) -> Self {
        match err {
            MetaError::InvalidRecordState(reason) => MetaStoreError::InvalidRecordState(reason),
            MetaError::InvalidRoleTransition { from, to } => {
                MetaStoreError::InvalidRoleTransition { from, to }
            }
            other => MetaStoreError::InvalidRecordState(other.to_string()),
        }
    }
}
