// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run identities and stream identifiers

use crate::error::MetaError;
use serde::{Deserialize, Serialize};

/// Length of a generated run id (hex characters)
pub const RUN_ID_LEN: usize = 40;

/// Identity of a replication source or of this keeper's own run
///
/// Opaque to the store. Deserialization accepts any string so that a
/// corrupted record surfaces through `ReplicationMeta::validate` rather
/// than a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    pub fn new(id: impl Into<String>) -> Result<Self, MetaError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(MetaError::InvalidRunId("run id must not be empty".to_string()));
        }
        Ok(Self(id))
    }

    /// Fresh random run id of `RUN_ID_LEN` lowercase hex characters
    pub fn generate() -> Self {
        let hex: String = [uuid::Uuid::new_v4(), uuid::Uuid::new_v4()]
            .iter()
            .flat_map(|u| u.simple().to_string().into_bytes())
            .take(RUN_ID_LEN)
            .map(char::from)
            .collect();
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RunId {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Identifier of one replication stream
///
/// Used as a directory name, so only `[A-Za-z0-9._-]` is accepted and the
/// special names `.` and `..` are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StreamId(String);

impl StreamId {
    pub fn new(id: impl Into<String>) -> Result<Self, MetaError> {
        let id = id.into();
        let valid_chars = id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
        if id.is_empty() || id == "." || id == ".." || !valid_chars {
            return Err(MetaError::InvalidStreamId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StreamId {
    type Error = MetaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StreamId> for String {
    fn from(id: StreamId) -> Self {
        id.0
    }
}

impl std::fmt::Display for StreamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for StreamId {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
