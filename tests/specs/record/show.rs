//! Record show specs

use crate::prelude::*;

#[test]
fn fresh_stream_shows_default_record_without_writing_it() {
    let site = Site::new();

    let record = site.ctl().args(&["show"]).passes().stdout_json();
    assert_eq!(record["local_begin_offset"], 1);
    assert_eq!(record["begin_offset"], serde_json::Value::Null);
    assert_eq!(record["upstream_run_id"], serde_json::Value::Null);

    assert!(!site.data_dir("primary").join("default/meta.json").exists());
}

#[test]
fn persisted_record_is_shown_as_stored() {
    let site = Site::new();
    site.seed("primary", "default", synced_record());

    let record = site.ctl().args(&["show"]).passes().stdout_json();
    similar_asserts::assert_eq!(record, synced_record());
}

#[test]
fn streams_are_kept_apart() {
    let site = Site::new();
    site.seed("primary", "shard-1", synced_record());

    let other = site
        .ctl()
        .args(&["--stream", "shard-2", "show"])
        .passes()
        .stdout_json();
    assert_eq!(other["begin_offset"], serde_json::Value::Null);

    let seeded = site
        .ctl()
        .args(&["--stream", "shard-1", "show"])
        .passes()
        .stdout_json();
    assert_eq!(seeded["begin_offset"], 100);
}

#[test]
fn config_file_sets_the_starting_local_offset() {
    let site = Site::new();
    let config = site.file(
        "keeper.toml",
        &format!(
            "data_dir = \"{}\"\nlocal_begin_offset = 5\nlog_filter = \"error\"\n",
            site.data_dir("primary").display()
        ),
    );

    let record = cli()
        .args(&["--config", config.to_str().unwrap(), "show"])
        .passes()
        .stdout_json();
    assert_eq!(record["local_begin_offset"], 5);
    assert_eq!(record["snapshot_last_local_offset"], 4);
}
