//! Usage error specs
//!
//! Bad input is rejected before anything is fetched.

use crate::prelude::*;

#[test]
fn watch_requires_a_target() {
    Project::empty()
        .pw()
        .args(&["watch"])
        .fails()
        .code(2)
        .stderr_has("required");
}

#[test]
fn unknown_notify_filter_is_rejected() {
    Project::empty()
        .pw()
        .args(&["watch", "12", "--notify", "loud"])
        .fails()
        .stderr_has("unknown notify filter: loud");
}

#[test]
fn unknown_stop_condition_is_rejected() {
    Project::empty()
        .pw()
        .args(&["watch", "12", "--until", "green"])
        .fails()
        .stderr_has("unknown stop condition: green");
}

#[test]
fn zero_interval_is_rejected() {
    Project::empty()
        .pw()
        .args(&["watch", "12", "--interval", "0"])
        .fails()
        .code(1)
        .stderr_has("Invalid watch settings")
        .stderr_has("interval must be at least 1s");
}

#[test]
fn zero_max_iterations_is_rejected() {
    Project::empty()
        .pw()
        .args(&["watch", "12", "--max-iterations", "0"])
        .fails()
        .stderr_has("max_iterations must be at least 1");
}

#[test]
fn unknown_subcommand_fails() {
    Project::empty()
        .pw()
        .args(&["frobnicate"])
        .fails()
        .code(2);
}
