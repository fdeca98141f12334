// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator-facing errors with context and suggestions

use keeper_core::StreamId;
use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for operator display
#[derive(Debug)]
pub struct KeeperctlError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
}

impl KeeperctlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// No data location was given on the command line
    pub fn no_data_dir() -> Self {
        KeeperctlError::new("No data directory configured")
            .with_suggestion("Pass --data-dir <dir>")
            .with_suggestion("Or pass --config <keeper.toml> with a data_dir entry")
    }

    /// Becoming active needs the frame of the previous active keeper
    pub fn missing_handoff(stream: &StreamId, path: &Path) -> Self {
        KeeperctlError::new(format!("No handoff record for stream '{}'", stream))
            .with_context(format!("Expected at {}", path.display()))
            .with_context("Without it there is no safe offset frame to inherit")
            .with_suggestion(
                "Run 'keeperctl become-backup' on the previously active keeper first",
            )
            .with_suggestion("Check that both keepers share the same --handoff-dir")
            .with_suggestion("Do not retry automatically; confirm the frame manually")
    }
}

impl fmt::Display for KeeperctlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for KeeperctlError {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
