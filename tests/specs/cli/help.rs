//! Help and version specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    Project::empty()
        .pw()
        .args(&["--help"])
        .passes()
        .stdout_has("watch")
        .stdout_has("status")
        .stdout_has("completions");
}

#[test]
fn watch_help_lists_flags() {
    Project::empty()
        .pw()
        .args(&["watch", "--help"])
        .passes()
        .stdout_has("--interval")
        .stdout_has("--notify")
        .stdout_has("--until")
        .stdout_has("--max-iterations")
        .stdout_has("--desktop");
}

#[test]
fn status_help_mentions_json() {
    Project::empty()
        .pw()
        .args(&["status", "--help"])
        .passes()
        .stdout_has("--json");
}

#[test]
fn version_is_printed() {
    Project::empty()
        .pw()
        .args(&["--version"])
        .passes()
        .stdout_eq(&format!("pw {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn binary_is_located_from_the_profile_dir() {
    let bin = pw_bin();
    assert!(bin.is_file());
    assert_eq!(
        bin.file_stem().and_then(|s| s.to_str()),
        Some("pw"),
        "{}",
        bin.display()
    );
}
