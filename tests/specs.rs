//! Behavioral specifications for the pw CLI.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, and exit codes. None of them reach GitHub; every case
//! fails or finishes before the first `gh` call.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/completions.rs"]
mod cli_completions;
#[path = "specs/cli/errors.rs"]
mod cli_errors;
#[path = "specs/cli/help.rs"]
mod cli_help;

// watch/
#[path = "specs/watch/config.rs"]
mod watch_config;
#[path = "specs/watch/resolve.rs"]
mod watch_resolve;
