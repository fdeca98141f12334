// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! keeper-core: replication coordinates for a keeper relay
//!
//! This crate provides:
//! - The persisted coordinate record (`ReplicationMeta`) and its pure transitions
//! - Offset translation between upstream and local offset spaces
//! - Identity types for run ids, upstream endpoints, and streams
//! - The active/backup role state machine and handoff slot naming
//! - TOML configuration for the keeper data layout

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod endpoint;
pub mod error;
pub mod id;
pub mod meta;
pub mod offset;
pub mod role;

pub use config::{ConfigError, KeeperConfig, META_FILE};
pub use endpoint::Endpoint;
pub use error::MetaError;
pub use id::{RunId, StreamId, RUN_ID_LEN};
pub use meta::{MetaChange, ReplicationMeta, SnapshotStart, DEFAULT_LOCAL_BEGIN_OFFSET};
pub use role::{HandoffSlot, KeeperRole};
