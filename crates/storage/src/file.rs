// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON file storage for coordinate records
//!
//! Each record is a small JSON document wrapped in a versioned envelope:
//!
//! ```text
//! <stream_dir>/meta.json                       live record
//! <handoff_dir>/handoff-from-active.json       HandoffSlot::FromActive
//! ```

use crate::error::StorageError;
use crate::storage::MetaStorage;
use keeper_core::{HandoffSlot, KeeperConfig, ReplicationMeta, StreamId, META_FILE};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Current version of the on-disk envelope
pub const RECORD_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoredMeta {
    version: u32,
    meta: ReplicationMeta,
}

/// File-backed `MetaStorage` for one stream
#[derive(Debug, Clone)]
pub struct FileMetaStorage {
    dir: PathBuf,
    handoff_dir: PathBuf,
}

impl FileMetaStorage {
    /// Storage whose live record and handoff slots share one directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            handoff_dir: dir.clone(),
            dir,
        }
    }

    /// Storage for `stream` laid out according to `config`
    pub fn for_stream(config: &KeeperConfig, stream: &StreamId) -> Self {
        Self {
            dir: config.stream_dir(stream),
            handoff_dir: config.handoff_stream_dir(stream),
        }
    }

    pub fn with_handoff_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.handoff_dir = dir.into();
        self
    }

    pub fn meta_path(&self) -> PathBuf {
        self.dir.join(META_FILE)
    }

    pub fn handoff_path(&self, slot: HandoffSlot) -> PathBuf {
        self.handoff_dir.join(slot.file_name())
    }

    fn read(path: &Path) -> Result<Option<ReplicationMeta>, StorageError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let stored: StoredMeta =
            serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?;
        if stored.version != RECORD_VERSION {
            return Err(StorageError::UnsupportedVersion {
                found: stored.version,
                expected: RECORD_VERSION,
            });
        }

        tracing::debug!(path = %path.display(), meta = %stored.meta, "record loaded");
        Ok(Some(stored.meta))
    }

    fn write(path: &Path, meta: &ReplicationMeta) -> Result<(), StorageError> {
        let stored = StoredMeta {
            version: RECORD_VERSION,
            meta: meta.clone(),
        };
        let json = serde_json::to_vec_pretty(&stored)?;
        write_atomic(path, &json)
    }
}

impl MetaStorage for FileMetaStorage {
    fn load_current(&self) -> Result<Option<ReplicationMeta>, StorageError> {
        Self::read(&self.meta_path())
    }

    fn save_current(&self, meta: &ReplicationMeta) -> Result<(), StorageError> {
        Self::write(&self.meta_path(), meta)
    }

    fn load_handoff(&self, slot: HandoffSlot) -> Result<Option<ReplicationMeta>, StorageError> {
        Self::read(&self.handoff_path(slot))
    }

    fn save_handoff(&self, slot: HandoffSlot, meta: &ReplicationMeta) -> Result<(), StorageError> {
        Self::write(&self.handoff_path(slot), meta)
    }

    fn remove_handoff(&self, slot: HandoffSlot) -> Result<(), StorageError> {
        let path = self.handoff_path(slot);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        }
        sync_dir(path.parent().unwrap_or_else(|| Path::new(".")))
    }
}

/// Replace `path` with `bytes` so that a crash leaves the old or the new
/// content, never a truncated file
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;
    sync_dir(dir)?;

    Ok(())
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<(), StorageError> {
    File::open(dir)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<(), StorageError> {
    Ok(())
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
