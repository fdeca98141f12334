//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_every_command() {
    let out = cli().args(&["--help"]).passes();
    for command in [
        "show",
        "streams",
        "translate",
        "set-upstream",
        "rotate-run-id",
        "become-backup",
        "become-active",
        "handoff",
    ] {
        assert!(out.stdout().contains(command), "missing {command}");
    }
}

#[test]
fn version_prints_binary_name() {
    cli().args(&["--version"]).passes().stdout_has("keeperctl");
}
