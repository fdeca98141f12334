//! Error reporting specs
//!
//! Failures exit non-zero and explain themselves on stderr.

use crate::prelude::*;

#[test]
fn missing_data_dir_is_reported_with_suggestions() {
    cli()
        .args(&["show"])
        .fails()
        .stderr_has("error: No data directory configured")
        .stderr_has("--data-dir");
}

#[test]
fn invalid_stream_name_is_rejected() {
    let site = Site::new();
    site.ctl().args(&["--stream", "../escape", "show"]).fails();
    assert!(!site.path().join("escape").exists());
}

#[test]
fn corrupt_record_is_reported_not_replaced() {
    let site = Site::new();
    let path = site.file("primary/default/meta.json", "{not json");

    site.ctl()
        .args(&["show"])
        .fails()
        .stderr_has("invalid record state");

    assert_eq!(std::fs::read_to_string(path).unwrap(), "{not json");
}

#[test]
fn unsupported_record_version_is_reported() {
    let site = Site::new();
    site.file(
        "primary/default/meta.json",
        &serde_json::json!({ "version": 99, "meta": synced_record() }).to_string(),
    );

    site.ctl().args(&["show"]).fails().stderr_has("version");
}

#[test]
fn unknown_config_key_is_rejected() {
    let site = Site::new();
    let config = site.file(
        "keeper.toml",
        &format!(
            "data_dir = \"{}\"\nsurprise = true\n",
            site.data_dir("primary").display()
        ),
    );

    cli()
        .args(&["--config", config.to_str().unwrap(), "show"])
        .fails()
        .stderr_has("surprise");
}
