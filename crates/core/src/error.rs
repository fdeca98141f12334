// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors for coordinate records and identity types

use crate::role::KeeperRole;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetaError {
    #[error("invalid record state: {0}")]
    InvalidRecordState(String),
    #[error("invalid endpoint '{input}': {reason}")]
    InvalidEndpoint { input: String, reason: &'static str },
    #[error("invalid run id: {0}")]
    InvalidRunId(String),
    #[error("invalid stream id '{0}'")]
    InvalidStreamId(String),
    #[error("invalid role transition: {from} -> {to}")]
    InvalidRoleTransition { from: KeeperRole, to: KeeperRole },
}
