//! Identifier resolution specs
//!
//! A batch that cannot be resolved still produces a report and exits 0.

use crate::prelude::*;

#[test]
fn invalid_identifier_produces_a_report() {
    Project::empty()
        .pw()
        .args(&["watch", "not-a-pr"])
        .passes()
        .stdout_has("Error: not a PR number, PR URL or ticket key: \"not-a-pr\"")
        .stdout_has("Finished after 0 iterations: could not resolve identifiers.");
}

#[test]
fn one_bad_identifier_fails_the_batch() {
    Project::empty()
        .pw()
        .args(&["watch", "12", "https://example.com/issues/3"])
        .passes()
        .stdout_has("could not resolve identifiers")
        .stdout_lacks("Watching");
}

#[test]
fn zero_is_not_a_pr_number() {
    Project::empty()
        .pw()
        .args(&["watch", "0"])
        .passes()
        .stdout_has("not a PR number");
}

#[test]
fn status_rejects_invalid_identifier() {
    Project::empty()
        .pw()
        .args(&["status", "not-a-pr"])
        .fails()
        .code(1)
        .stderr_has("Could not resolve 'not-a-pr'");
}
