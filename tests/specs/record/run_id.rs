//! Local run id specs

use crate::prelude::*;

#[test]
fn rotate_run_id_uses_given_id() {
    let site = Site::new();

    site.ctl()
        .args(&["rotate-run-id", "keeper-b"])
        .passes()
        .stdout_eq("Local run id for 'default' set to keeper-b\n");

    assert_eq!(site.record("primary", "default")["local_run_id"], "keeper-b");
}

#[test]
fn rotate_run_id_generates_hex_id() {
    let site = Site::new();

    site.ctl().args(&["rotate-run-id"]).passes();

    let record = site.record("primary", "default");
    let run_id = record["local_run_id"].as_str().unwrap();
    assert_eq!(run_id.len(), 40);
    assert!(run_id.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn rotated_run_id_becomes_upstream_identity_as_backup() {
    let site = Site::new();
    site.seed("primary", "default", synced_record());

    site.ctl().args(&["rotate-run-id", "keeper-b"]).passes();
    site.ctl().args(&["become-backup"]).passes();

    assert_eq!(site.record("primary", "default")["upstream_run_id"], "keeper-b");
    let handoff = site.ctl().args(&["handoff"]).passes().stdout_json();
    assert_eq!(handoff["local_run_id"], "keeper-b");
}
