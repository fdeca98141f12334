// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Replication coordinate record
//!
//! `ReplicationMeta` is an immutable value describing where one replication
//! stream is positioned. Every change is expressed as a `MetaChange` and
//! applied with [`ReplicationMeta::apply`], which duplicates the record and
//! returns the changed copy; the original is never touched.
//!
//! ## Offset spaces
//!
//! The upstream source and this keeper number their logs independently. The
//! pair (`begin_offset`, `local_begin_offset`) anchors the two spaces:
//!
//! ```text
//! local_offset - local_begin_offset == upstream_offset - begin_offset
//! ```
//!
//! `SyncBegun`, `SnapshotBegun`, `UpstreamChanged` and the role changes
//! re-anchor; everything else keeps the anchor and therefore keeps the
//! mapping linear.

use crate::endpoint::Endpoint;
use crate::error::MetaError;
use crate::id::RunId;
use crate::offset;
use serde::{Deserialize, Serialize};

/// Local offset a brand new stream starts its log at
pub const DEFAULT_LOCAL_BEGIN_OFFSET: i64 = 1;

/// Coordinates of one replication stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationMeta {
    upstream_run_id: Option<RunId>,
    local_run_id: Option<RunId>,
    begin_offset: Option<i64>,
    local_begin_offset: i64,
    upstream_address: Option<Endpoint>,
    snapshot_file: Option<String>,
    snapshot_file_size: u64,
    snapshot_last_local_offset: i64,
    #[serde(default)]
    command_file_prefix: Option<String>,
}

/// Parameters of a full snapshot transfer that is starting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotStart {
    pub upstream_run_id: RunId,
    /// Upstream offset the snapshot corresponds to
    pub begin_offset: i64,
    pub snapshot_file: String,
    pub snapshot_file_size: u64,
    /// Prefix of the command files continuing this snapshot, if known
    pub command_file_prefix: Option<String>,
}

/// A named change to a coordinate record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaChange {
    UpstreamAddress {
        address: Endpoint,
    },
    LocalRunId {
        run_id: RunId,
    },
    /// The upstream handshake agreed on a starting point
    SyncBegun {
        upstream_run_id: RunId,
        local_begin_offset: i64,
    },
    SnapshotBegun(SnapshotStart),
    /// A snapshot finished; `upstream_offset` is where its content ends
    SnapshotUpdated {
        snapshot_file: String,
        snapshot_file_size: u64,
        upstream_offset: i64,
    },
    /// The upstream source switched; `local_offset` and `upstream_offset`
    /// name the same position in the two spaces
    UpstreamChanged {
        local_offset: i64,
        address: Endpoint,
        upstream_run_id: RunId,
        upstream_offset: i64,
    },
    BecameBackup,
    /// Inherit the frame recorded by the previously active keeper
    BecameActive {
        handoff: Box<ReplicationMeta>,
    },
}

impl MetaChange {
    /// Change name for log lines
    pub fn name(&self) -> &'static str {
        match self {
            MetaChange::UpstreamAddress { .. } => "upstream_address",
            MetaChange::LocalRunId { .. } => "local_run_id",
            MetaChange::SyncBegun { .. } => "sync_begun",
            MetaChange::SnapshotBegun(_) => "snapshot_begun",
            MetaChange::SnapshotUpdated { .. } => "snapshot_updated",
            MetaChange::UpstreamChanged { .. } => "upstream_changed",
            MetaChange::BecameBackup => "became_backup",
            MetaChange::BecameActive { .. } => "became_active",
        }
    }
}

impl Default for ReplicationMeta {
    fn default() -> Self {
        Self::starting_at(DEFAULT_LOCAL_BEGIN_OFFSET)
    }
}

impl ReplicationMeta {
    /// Empty record whose local log begins at `local_begin_offset`
    pub fn starting_at(local_begin_offset: i64) -> Self {
        Self {
            upstream_run_id: None,
            local_run_id: None,
            begin_offset: None,
            local_begin_offset,
            upstream_address: None,
            snapshot_file: None,
            snapshot_file_size: 0,
            snapshot_last_local_offset: local_begin_offset.saturating_sub(1),
            command_file_prefix: None,
        }
    }

    pub fn upstream_run_id(&self) -> Option<&RunId> {
        self.upstream_run_id.as_ref()
    }

    pub fn local_run_id(&self) -> Option<&RunId> {
        self.local_run_id.as_ref()
    }

    pub fn begin_offset(&self) -> Option<i64> {
        self.begin_offset
    }

    pub fn local_begin_offset(&self) -> i64 {
        self.local_begin_offset
    }

    pub fn upstream_address(&self) -> Option<&Endpoint> {
        self.upstream_address.as_ref()
    }

    pub fn snapshot_file(&self) -> Option<&str> {
        self.snapshot_file.as_deref()
    }

    pub fn snapshot_file_size(&self) -> u64 {
        self.snapshot_file_size
    }

    pub fn snapshot_last_local_offset(&self) -> i64 {
        self.snapshot_last_local_offset
    }

    pub fn command_file_prefix(&self) -> Option<&str> {
        self.command_file_prefix.as_deref()
    }

    /// Translate an upstream offset into this keeper's local offset space
    pub fn translate(&self, upstream_offset: i64) -> i64 {
        offset::upstream_to_local(self, upstream_offset)
    }

    /// Translate a local offset back into the upstream offset space
    pub fn local_to_upstream(&self, local_offset: i64) -> Option<i64> {
        offset::local_to_upstream(self, local_offset)
    }

    /// Check the structural invariants of a record
    pub fn validate(&self) -> Result<(), MetaError> {
        if self.local_begin_offset < 0 {
            return Err(MetaError::InvalidRecordState(format!(
                "local_begin_offset {} is negative",
                self.local_begin_offset
            )));
        }
        if self.snapshot_last_local_offset < self.local_begin_offset - 1 {
            return Err(MetaError::InvalidRecordState(format!(
                "snapshot_last_local_offset {} is below local_begin_offset - 1 ({})",
                self.snapshot_last_local_offset,
                self.local_begin_offset - 1
            )));
        }
        for (field, id) in [
            ("upstream_run_id", &self.upstream_run_id),
            ("local_run_id", &self.local_run_id),
        ] {
            if id.as_ref().is_some_and(RunId::is_blank) {
                return Err(MetaError::InvalidRecordState(format!("{field} is empty")));
            }
        }
        if self.snapshot_file.as_deref() == Some("") {
            return Err(MetaError::InvalidRecordState(
                "snapshot_file is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply a change to a duplicate of this record
    ///
    /// The result is validated; a change that would produce an invalid
    /// record is rejected and `self` stays the current state.
    pub fn apply(&self, change: &MetaChange) -> Result<ReplicationMeta, MetaError> {
        let mut dup = self.clone();

        match change {
            MetaChange::UpstreamAddress { address } => {
                dup.upstream_address = Some(address.clone());
            }

            MetaChange::LocalRunId { run_id } => {
                dup.local_run_id = Some(run_id.clone());
            }

            MetaChange::SyncBegun {
                upstream_run_id,
                local_begin_offset,
            } => {
                dup.upstream_run_id = Some(upstream_run_id.clone());
                dup.local_begin_offset = *local_begin_offset;
                // Nothing in the new local log is covered by a snapshot yet
                dup.snapshot_last_local_offset = dup
                    .snapshot_last_local_offset
                    .max(local_begin_offset.saturating_sub(1));
            }

            MetaChange::SnapshotBegun(start) => {
                dup.upstream_run_id = Some(start.upstream_run_id.clone());
                dup.begin_offset = Some(start.begin_offset);
                dup.snapshot_file = Some(start.snapshot_file.clone());
                dup.snapshot_file_size = start.snapshot_file_size;
                if start.command_file_prefix.is_some() {
                    dup.command_file_prefix = start.command_file_prefix.clone();
                }
                dup.snapshot_last_local_offset = dup.local_begin_offset.saturating_sub(1);
            }

            MetaChange::SnapshotUpdated {
                snapshot_file,
                snapshot_file_size,
                upstream_offset,
            } => {
                dup.snapshot_file = Some(snapshot_file.clone());
                dup.snapshot_file_size = *snapshot_file_size;
                dup.snapshot_last_local_offset =
                    offset::checked_upstream_to_local(&dup, *upstream_offset).ok_or_else(|| {
                        MetaError::InvalidRecordState(format!(
                            "snapshot end offset {} is outside the local offset range",
                            upstream_offset
                        ))
                    })?;
            }

            MetaChange::UpstreamChanged {
                local_offset,
                address,
                upstream_run_id,
                upstream_offset,
            } => {
                dup.upstream_address = Some(address.clone());
                dup.upstream_run_id = Some(upstream_run_id.clone());
                let begin_offset = offset::rebased_begin_offset(
                    dup.local_begin_offset,
                    *local_offset,
                    *upstream_offset,
                )
                .ok_or_else(|| {
                    MetaError::InvalidRecordState(format!(
                        "upstream offset {} at local offset {} is outside the offset range",
                        upstream_offset, local_offset
                    ))
                })?;
                dup.begin_offset = Some(begin_offset);
            }

            MetaChange::BecameBackup => {
                // The local log becomes its own reference frame
                dup.begin_offset = Some(dup.local_begin_offset);
                dup.upstream_run_id = dup.local_run_id.clone();
            }

            MetaChange::BecameActive { handoff } => {
                dup.snapshot_last_local_offset = handoff.snapshot_last_local_offset;
                dup.begin_offset = handoff.begin_offset;
                dup.local_begin_offset = handoff.local_begin_offset;
                dup.local_run_id = handoff.local_run_id.clone();
                dup.upstream_address = handoff.upstream_address.clone();
                dup.upstream_run_id = handoff.upstream_run_id.clone();
            }
        }

        dup.validate()?;
        Ok(dup)
    }

    /// Whether the coordinate frame of `other` matches this record
    ///
    /// Compares the fields a role handoff carries over; snapshot artifacts
    /// and command file naming are ignored.
    pub fn same_frame(&self, other: &ReplicationMeta) -> bool {
        self.begin_offset == other.begin_offset
            && self.local_begin_offset == other.local_begin_offset
            && self.snapshot_last_local_offset == other.snapshot_last_local_offset
            && self.upstream_run_id == other.upstream_run_id
            && self.local_run_id == other.local_run_id
            && self.upstream_address == other.upstream_address
    }
}

impl std::fmt::Display for ReplicationMeta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let opt = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "upstream={} upstream_run_id={} local_run_id={} begin_offset={} \
             local_begin_offset={} snapshot={}({}) snapshot_last_local_offset={}",
            opt(self.upstream_address.as_ref().map(ToString::to_string)),
            opt(self.upstream_run_id.as_ref().map(ToString::to_string)),
            opt(self.local_run_id.as_ref().map(ToString::to_string)),
            opt(self.begin_offset.map(|o| o.to_string())),
            self.local_begin_offset,
            opt(self.snapshot_file.clone()),
            self.snapshot_file_size,
            self.snapshot_last_local_offset,
        )
    }
}

#[cfg(test)]
#[path = "meta_tests.rs"]
mod tests;
