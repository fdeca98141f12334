// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn never_written_loads_as_none() {
    let storage = MemoryMetaStorage::new();

    assert_eq!(storage.load_current().unwrap(), None);
    assert_eq!(storage.load_handoff(HandoffSlot::FromActive).unwrap(), None);
}

#[test]
fn peer_shares_handoff_but_not_live_record() {
    let a = MemoryMetaStorage::new();
    let b = a.peer();
    let meta = ReplicationMeta::starting_at(7);

    a.save_current(&meta).unwrap();
    a.save_handoff(HandoffSlot::FromActive, &meta).unwrap();

    assert_eq!(b.load_current().unwrap(), None);
    assert_eq!(b.load_handoff(HandoffSlot::FromActive).unwrap(), Some(meta));
}

#[test]
fn failed_write_is_recorded_but_not_stored() {
    let storage = MemoryMetaStorage::with_current(ReplicationMeta::default());
    storage.set_fail_current_writes(true);

    let err = storage.save_current(&ReplicationMeta::starting_at(9)).unwrap_err();

    assert!(matches!(err, StorageError::Injected(_)));
    assert_eq!(storage.stored_current(), Some(ReplicationMeta::default()));
    assert_eq!(storage.current_writes(), 1);
}

#[test]
fn failed_handoff_write_leaves_slot_empty() {
    let storage = MemoryMetaStorage::new();
    storage.set_fail_handoff_writes(true);

    assert!(storage
        .save_handoff(HandoffSlot::FromActive, &ReplicationMeta::default())
        .is_err());
    assert_eq!(storage.stored_handoff(HandoffSlot::FromActive), None);
}

#[test]
fn calls_are_recorded_in_order() {
    let storage = MemoryMetaStorage::new();
    let meta = ReplicationMeta::default();

    storage.load_current().unwrap();
    storage.save_current(&meta).unwrap();
    storage.load_handoff(HandoffSlot::FromActive).unwrap();

    assert_eq!(
        storage.calls(),
        vec![
            StorageCall::LoadCurrent,
            StorageCall::SaveCurrent { meta },
            StorageCall::LoadHandoff {
                slot: HandoffSlot::FromActive
            },
        ]
    );
}

#[test]
fn read_failures_are_injected() {
    let storage = MemoryMetaStorage::new();
    storage.set_fail_reads(true);

    assert!(storage.load_current().is_err());
    assert!(storage.load_handoff(HandoffSlot::FromActive).is_err());
}

#[test]
fn remove_handoff_is_visible_to_peer() {
    let a = MemoryMetaStorage::new();
    let b = a.peer();
    a.save_handoff(HandoffSlot::FromActive, &ReplicationMeta::default())
        .unwrap();

    a.remove_handoff(HandoffSlot::FromActive).unwrap();

    assert_eq!(b.load_handoff(HandoffSlot::FromActive).unwrap(), None);
    assert!(a
        .calls()
        .contains(&StorageCall::RemoveHandoff {
            slot: HandoffSlot::FromActive
        }));
}
