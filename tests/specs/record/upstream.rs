//! Upstream address specs

use crate::prelude::*;

#[test]
fn set_upstream_persists_address() {
    let site = Site::new();

    site.ctl()
        .args(&["set-upstream", "10.1.1.1:7000"])
        .passes()
        .stdout_eq("Upstream for 'default' set to 10.1.1.1:7000\n");

    assert_eq!(site.record("primary", "default")["upstream_address"], "10.1.1.1:7000");
}

#[test]
fn set_upstream_keeps_offset_frame() {
    let site = Site::new();
    site.seed("primary", "default", synced_record());

    site.ctl().args(&["set-upstream", "[::1]:7000"]).passes();

    let record = site.record("primary", "default");
    assert_eq!(record["upstream_address"], "[::1]:7000");
    assert_eq!(record["begin_offset"], 100);
    site.ctl().args(&["translate", "150"]).passes().stdout_eq("51\n");
}

#[test]
fn malformed_address_is_rejected() {
    let site = Site::new();

    site.ctl()
        .args(&["set-upstream", "no-port"])
        .fails()
        .stderr_has("no-port");

    assert!(!site.data_dir("primary").join("default/meta.json").exists());
}
