//! Config file specs
//!
//! The config file is read from `<config dir>/pw/config.toml` or
//! `--config`, and flags are applied on top before validation.

use crate::prelude::*;

#[test]
fn explicit_config_must_exist() {
    let temp = Project::empty();

    temp.pw()
        .args(&["watch", "12", "--config", "missing.toml"])
        .fails()
        .stderr_has("Failed to load config from")
        .stderr_has("missing.toml");
}

#[test]
fn malformed_config_is_reported() {
    let temp = Project::empty();
    temp.file("pw.toml", "interval = 30\n");

    temp.pw()
        .args(&["watch", "12", "--config", "pw.toml"])
        .fails()
        .stderr_has("Failed to load config from")
        .stderr_has("interval = \"30s\"");
}

#[test]
fn config_values_are_validated() {
    let temp = Project::empty();
    temp.file("pw.toml", "heartbeat_every = 0\n");

    temp.pw()
        .args(&["watch", "12", "--config", "pw.toml"])
        .fails()
        .stderr_has("heartbeat_every must be at least 1");
}

#[test]
fn flags_fix_an_invalid_config_value() {
    let temp = Project::empty();
    temp.file("pw.toml", "interval = \"0s\"\n");

    // Resolution fails on the bad identifier, which proves validation passed
    temp.pw()
        .args(&["watch", "not-a-pr", "--config", "pw.toml", "--interval", "5"])
        .passes()
        .stdout_has("could not resolve identifiers");
}
