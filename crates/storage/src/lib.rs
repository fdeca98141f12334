// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! keeper-storage: durable coordinate store for keeper replication streams
//!
//! ## Architecture
//!
//! ```text
//! protocol events ─→ MetaStore ─(lock, dup, apply, persist, swap)─→ MetaStorage
//!                        │
//! readers ←── ArcSwap<ReplicationMeta> (lock-free)
//!
//! control plane ─→ RoleEngine ─→ MetaStore::become_backup / become_active
//!                                        │
//!                                handoff slot (shared)
//! ```
//!
//! ## Durability guarantees
//!
//! - A record is written to storage before it becomes visible to readers
//! - A failed write leaves the previously published record in place
//! - File writes go through a synced temp file and an atomic rename

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod error;
pub mod file;
pub mod memory;
pub mod registry;
pub mod storage;
pub mod store;
pub mod transition;

pub use error::{MetaStoreError, StorageError};
pub use file::FileMetaStorage;
pub use memory::{MemoryMetaStorage, StorageCall};
pub use registry::MetaStores;
pub use storage::MetaStorage;
pub use store::MetaStore;
pub use transition::RoleEngine;
