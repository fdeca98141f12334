//! Stream listing specs

use crate::prelude::*;

#[test]
fn no_streams_on_empty_data_dir() {
    let site = Site::new();
    site.ctl().args(&["streams"]).passes().stdout_eq("No streams\n");
}

#[test]
fn lists_streams_with_a_persisted_record_in_order() {
    let site = Site::new();
    site.seed("primary", "shard-b", synced_record());
    site.seed("primary", "shard-a", synced_record());
    site.file("primary/empty/notes.txt", "not a stream");

    site.ctl()
        .args(&["streams"])
        .passes()
        .stdout_eq("shard-a\nshard-b\n");
}

#[test]
fn reading_a_stream_does_not_persist_it() {
    let site = Site::new();
    site.ctl().args(&["--stream", "idle", "show"]).passes();

    site.ctl().args(&["streams"]).passes().stdout_eq("No streams\n");
}
