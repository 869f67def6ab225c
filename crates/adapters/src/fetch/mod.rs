// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot fetching

mod gh;
mod parse;

pub use gh::GhFetcher;
pub use parse::{parse_pr_view, ParseError};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeFetcher;

use async_trait::async_trait;
use pw_core::Snapshot;
use thiserror::Error;

/// Errors from fetching a pull request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("command failed: {0}")]
    CommandFailed(String),
    #[error("pull request #{0} not found")]
    NotFound(u64),
    #[error("malformed response: {0}")]
    Parse(#[from] ParseError),
    #[error("io error: {0}")]
    Io(String),
}

/// Adapter producing one snapshot per call
///
/// Fetching must not have side effects visible to the watch engine; calling
/// it twice in a row observes the remote state twice.
#[async_trait]
pub trait SnapshotFetcher: Clone + Send + Sync + 'static {
    async fn fetch(&self, pr: u64) -> Result<Snapshot, FetchError>;
}
