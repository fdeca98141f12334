//! Shared helpers for keeperctl specs

#![allow(dead_code)]

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const UPSTREAM_RUN_ID: &str = "8f3d2c1b0a99887766554433221100ffeeddccbb";
pub const LOCAL_RUN_ID: &str = "0123456789abcdef0123456789abcdef01234567";

/// Record of a keeper that synced from upstream offset 100 onto local offset 1
pub fn synced_record() -> serde_json::Value {
    serde_json::json!({
        "upstream_run_id": UPSTREAM_RUN_ID,
        "local_run_id": LOCAL_RUN_ID,
        "begin_offset": 100,
        "local_begin_offset": 1,
        "upstream_address": "10.0.0.1:6379",
        "snapshot_file": "dump.rdb",
        "snapshot_file_size": 1024,
        "snapshot_last_local_offset": 0,
        "command_file_prefix": "cmd_"
    })
}

/// A temp directory holding any number of keepers and one shared handoff area
pub struct Site {
    root: TempDir,
}

impl Site {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn data_dir(&self, keeper: &str) -> PathBuf {
        self.path().join(keeper)
    }

    pub fn handoff_dir(&self) -> PathBuf {
        self.path().join("handoff")
    }

    /// keeperctl bound to the "primary" keeper
    pub fn ctl(&self) -> CliBuilder {
        self.keeper("primary")
    }

    /// keeperctl bound to the named keeper's data dir
    pub fn keeper(&self, name: &str) -> CliBuilder {
        cli().args(&[
            "--data-dir",
            self.data_dir(name).to_str().unwrap(),
            "--handoff-dir",
            self.handoff_dir().to_str().unwrap(),
        ])
    }

    /// Write a file relative to the site root
    pub fn file(&self, path: &str, content: &str) -> PathBuf {
        let full = self.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&full, content).unwrap();
        full
    }

    /// Persist `meta` as the live record of `stream` on `keeper`
    pub fn seed(&self, keeper: &str, stream: &str, meta: serde_json::Value) {
        let envelope = serde_json::json!({ "version": 1, "meta": meta });
        self.file(
            &format!("{}/{}/meta.json", keeper, stream),
            &serde_json::to_string_pretty(&envelope).unwrap(),
        );
    }

    /// Read back the live record of `stream` on `keeper`
    pub fn record(&self, keeper: &str, stream: &str) -> serde_json::Value {
        let path = self.data_dir(keeper).join(stream).join("meta.json");
        let text = std::fs::read_to_string(path).unwrap();
        let envelope: serde_json::Value = serde_json::from_str(&text).unwrap();
        envelope["meta"].clone()
    }
}

pub fn cli() -> CliBuilder {
    let mut cmd = Command::cargo_bin("keeperctl").unwrap();
    cmd.env_remove("RUST_LOG");
    CliBuilder { cmd }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> RunAssert {
        RunAssert {
            assert: self.cmd.assert().success(),
        }
    }

    pub fn fails(mut self) -> RunAssert {
        RunAssert {
            assert: self.cmd.assert().failure(),
        }
    }
}

pub struct RunAssert {
    assert: Assert,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.assert.get_output().stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.assert.get_output().stderr).into_owned()
    }

    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).unwrap()
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stdout(predicate::str::contains(expected)),
        }
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        Self {
            assert: self
                .assert
                .stdout(predicate::str::contains(unexpected).not()),
        }
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stderr(predicate::str::contains(expected)),
        }
    }
}
