//! Shared helpers for CLI specs
//!
//! `Project` is an isolated scratch directory that also serves as HOME and
//! the config directory, so a developer's own `pw/config.toml` never leaks
//! into a test.

#![allow(dead_code)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Path to the `pw` binary built alongside this test harness.
///
/// The binary belongs to another workspace member, so cargo does not set
/// `CARGO_BIN_EXE_pw` here; it lives in the profile directory one level
/// above this harness in `deps/`.
pub fn pw_bin() -> PathBuf {
    if let Some(path) = option_env!("CARGO_BIN_EXE_pw") {
        return PathBuf::from(path);
    }
    let exe = std::env::current_exe().unwrap();
    let mut dir = exe.parent().unwrap();
    if dir.ends_with("deps") {
        dir = dir.parent().unwrap();
    }
    let bin = dir.join(format!("pw{}", std::env::consts::EXE_SUFFIX));
    assert!(
        bin.is_file(),
        "pw binary not found at {}; run `cargo test --workspace`",
        bin.display()
    );
    bin
}

pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `rel`, creating parent directories
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// Write the default config file that `pw watch` picks up
    pub fn config(&self, content: &str) {
        self.file("config/pw/config.toml", content);
    }

    pub fn pw(&self) -> Cli {
        let mut cmd = Command::new(pw_bin());
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env_remove("RUST_LOG")
            .env_remove("JIRA_BASE_URL")
            .env_remove("JIRA_EMAIL")
            .env_remove("JIRA_API_TOKEN");
        Cli { cmd }
    }
}

pub struct Cli {
    cmd: Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> Output {
        Output {
            assert: self.cmd.assert().success(),
        }
    }

    pub fn fails(mut self) -> Output {
        Output {
            assert: self.cmd.assert().failure(),
        }
    }
}

pub struct Output {
    assert: assert_cmd::assert::Assert,
}

impl Output {
    pub fn stdout_has(self, needle: &str) -> Self {
        Self {
            assert: self.assert.stdout(predicate::str::contains(needle)),
        }
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        Self {
            assert: self.assert.stdout(predicate::str::contains(needle).not()),
        }
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        Self {
            assert: self.assert.stderr(predicate::str::contains(needle)),
        }
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.assert.get_output().stdout).to_string();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    pub fn code(self, code: i32) -> Self {
        Self {
            assert: self.assert.code(code),
        }
    }
}
