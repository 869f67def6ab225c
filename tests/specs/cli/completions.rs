//! Shell completion specs

use crate::prelude::*;

#[test]
fn bash_completions_mention_subcommands() {
    Project::empty()
        .pw()
        .args(&["completions", "bash"])
        .passes()
        .stdout_has("_pw")
        .stdout_has("watch");
}

#[test]
fn zsh_completions_are_generated() {
    Project::empty()
        .pw()
        .args(&["completions", "zsh"])
        .passes()
        .stdout_has("#compdef pw");
}

#[test]
fn unknown_shell_fails() {
    Project::empty()
        .pw()
        .args(&["completions", "tcsh"])
        .fails()
        .code(2);
}
