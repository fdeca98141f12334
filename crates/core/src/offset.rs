// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Offset translation between upstream and local offset spaces
//!
//! All functions are pure. The mapping is
//! `local - local_begin_offset == upstream - begin_offset`.
//!
//! Arithmetic is done in `i128`. Queries saturate at the `i64` bounds;
//! the `checked_*` forms used by mutations return `None` instead, so an
//! out-of-range anchor is never persisted.

use crate::meta::ReplicationMeta;

/// Translate an upstream offset to the local offset space
///
/// Before the first snapshot there is no `begin_offset`; the result is then
/// `local_begin_offset - 1`, meaning nothing has been applied locally yet.
pub fn upstream_to_local(meta: &ReplicationMeta, upstream_offset: i64) -> i64 {
    match meta.begin_offset() {
        Some(begin_offset) => {
            saturate(shift(upstream_offset, begin_offset, meta.local_begin_offset()))
        }
        None => {
            tracing::debug!(
                upstream_offset,
                "no begin offset yet, translating to local_begin_offset - 1"
            );
            meta.local_begin_offset().saturating_sub(1)
        }
    }
}

/// Like [`upstream_to_local`], `None` when the result does not fit
pub fn checked_upstream_to_local(meta: &ReplicationMeta, upstream_offset: i64) -> Option<i64> {
    match meta.begin_offset() {
        Some(begin_offset) => exact(shift(
            upstream_offset,
            begin_offset,
            meta.local_begin_offset(),
        )),
        None => meta.local_begin_offset().checked_sub(1),
    }
}

/// Translate a local offset to the upstream offset space
pub fn local_to_upstream(meta: &ReplicationMeta, local_offset: i64) -> Option<i64> {
    meta.begin_offset().map(|begin_offset| {
        saturate(shift(local_offset, meta.local_begin_offset(), begin_offset))
    })
}

/// Solve the mapping for a new `begin_offset` given one known pair of
/// corresponding offsets; `None` when it does not fit
pub fn rebased_begin_offset(
    local_begin_offset: i64,
    local_offset: i64,
    upstream_offset: i64,
) -> Option<i64> {
    exact(shift(upstream_offset, local_offset, local_begin_offset))
}

/// `from - base + to`
fn shift(from: i64, base: i64, to: i64) -> i128 {
    i128::from(from) - i128::from(base) + i128::from(to)
}

fn exact(value: i128) -> Option<i64> {
    i64::try_from(value).ok()
}

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
#[path = "offset_tests.rs"]
mod tests;
