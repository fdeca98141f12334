//! Role transition specs
//!
//! A keeper becoming backup leaves its frame in the shared handoff area;
//! the keeper becoming active inherits it.

use crate::prelude::*;

#[test]
fn become_backup_leaves_handoff_record() {
    let site = Site::new();
    site.seed("primary", "default", synced_record());

    site.ctl()
        .args(&["become-backup"])
        .passes()
        .stdout_has("Stream 'default' is now backup");

    let handoff = site.ctl().args(&["handoff"]).passes().stdout_json();
    similar_asserts::assert_eq!(handoff, synced_record());
}

#[test]
fn become_backup_reanchors_on_own_run_id() {
    let site = Site::new();
    site.seed("primary", "default", synced_record());

    site.ctl().args(&["become-backup"]).passes();

    let record = site.record("primary", "default");
    assert_eq!(record["upstream_run_id"], LOCAL_RUN_ID);
    assert_eq!(record["begin_offset"], 1);
    assert_eq!(record["local_begin_offset"], 1);
}

#[test]
fn become_active_inherits_previous_active_frame() {
    let site = Site::new();
    site.seed("primary", "default", synced_record());

    site.keeper("primary").args(&["become-backup"]).passes();
    site.keeper("secondary")
        .args(&["become-active"])
        .passes()
        .stdout_has("Stream 'default' is now active");

    let record = site.record("secondary", "default");
    assert_eq!(record["upstream_run_id"], UPSTREAM_RUN_ID);
    assert_eq!(record["begin_offset"], 100);
    assert_eq!(record["upstream_address"], "10.0.0.1:6379");

    // Both keepers agree on where upstream offset 150 lives locally
    site.keeper("secondary")
        .args(&["translate", "150"])
        .passes()
        .stdout_eq("51\n");
}

#[test]
fn become_active_without_handoff_needs_manual_intervention() {
    let site = Site::new();

    site.keeper("secondary")
        .args(&["become-active"])
        .fails()
        .stderr_has("No handoff record for stream 'default'")
        .stderr_has("handoff-from-active.json")
        .stderr_has("become-backup");

    assert!(!site.data_dir("secondary").join("default/meta.json").exists());
}

#[test]
fn handoff_is_absent_until_someone_becomes_backup() {
    let site = Site::new();

    site.ctl()
        .args(&["handoff"])
        .passes()
        .stdout_eq("No handoff record for stream 'default'\n");
}

#[test]
fn handoff_is_per_stream() {
    let site = Site::new();
    site.seed("primary", "shard-1", synced_record());

    site.ctl().args(&["--stream", "shard-1", "become-backup"]).passes();

    site.keeper("secondary")
        .args(&["--stream", "shard-2", "become-active"])
        .fails();
    site.keeper("secondary")
        .args(&["--stream", "shard-1", "become-active"])
        .passes();
}
