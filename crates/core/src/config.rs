// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Keeper configuration
//!
//! Loaded from a TOML file:
//!
//! ```toml
//! data_dir = "/var/lib/keeper"
//! handoff_dir = "/var/lib/keeper/handoff"   # optional, defaults to data_dir
//! log_filter = "info"                        # optional
//! local_begin_offset = 1                     # optional, for new streams
//! ```
//!
//! Layout on disk, per stream:
//!
//! ```text
//! <data_dir>/<stream>/meta.json
//! <handoff_dir>/<stream>/handoff-from-active.json
//! ```

use crate::id::StreamId;
use crate::meta::DEFAULT_LOCAL_BEGIN_OFFSET;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of a stream's live coordinate record
pub const META_FILE: &str = "meta.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeeperConfig {
    /// Base directory holding one subdirectory per stream
    pub data_dir: PathBuf,
    /// Where handoff records are exchanged; may be shared between keepers
    #[serde(default)]
    pub handoff_dir: Option<PathBuf>,
    /// Default tracing filter when `RUST_LOG` is unset
    #[serde(default)]
    pub log_filter: Option<String>,
    /// Local begin offset for streams with no persisted record
    #[serde(default = "default_local_begin_offset")]
    pub local_begin_offset: i64,
}

fn default_local_begin_offset() -> i64 {
    DEFAULT_LOCAL_BEGIN_OFFSET
}

impl KeeperConfig {
    /// Config rooted at `data_dir` with every other setting defaulted
    pub fn for_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            handoff_dir: None,
            log_filter: None,
            local_begin_offset: DEFAULT_LOCAL_BEGIN_OFFSET,
        }
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: KeeperConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_dir must not be empty".to_string()));
        }
        if self.local_begin_offset < 0 {
            return Err(ConfigError::Invalid(format!(
                "local_begin_offset must not be negative (got {})",
                self.local_begin_offset
            )));
        }
        Ok(())
    }

    pub fn with_handoff_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.handoff_dir = Some(dir.into());
        self
    }

    /// Directory holding a stream's live record
    pub fn stream_dir(&self, stream: &StreamId) -> PathBuf {
        self.data_dir.join(stream.as_str())
    }

    /// Directory holding a stream's handoff records
    pub fn handoff_stream_dir(&self, stream: &StreamId) -> PathBuf {
        self.handoff_dir
            .as_deref()
            .unwrap_or(&self.data_dir)
            .join(stream.as_str())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
