//! Offset translation specs

use crate::prelude::*;

#[test]
fn translates_upstream_offset_into_local_space() {
    let site = Site::new();
    site.seed("primary", "default", synced_record());

    site.ctl().args(&["translate", "150"]).passes().stdout_eq("51\n");
    site.ctl().args(&["translate", "100"]).passes().stdout_eq("1\n");
}

#[test]
fn translates_local_offset_back_to_upstream() {
    let site = Site::new();
    site.seed("primary", "default", synced_record());

    site.ctl()
        .args(&["translate", "--to-upstream", "51"])
        .passes()
        .stdout_eq("150\n");
}

#[test]
fn stream_without_frame_translates_to_before_first_local_offset() {
    let site = Site::new();

    site.ctl().args(&["translate", "500"]).passes().stdout_eq("0\n");
}

#[test]
fn stream_without_frame_has_no_upstream_offset() {
    let site = Site::new();

    site.ctl()
        .args(&["translate", "--to-upstream", "1"])
        .fails()
        .stderr_has("has no upstream frame yet");
}
