// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the watch engine

use pw_adapters::FetchError;
use thiserror::Error;

/// Errors that can occur while coordinating several pull requests
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinatorError {
    /// Every fetch in the cycle failed, which points at something
    /// batch-wide such as lost connectivity
    #[error("all {attempted} fetches failed, last error: {last}")]
    AllFailed { attempted: usize, last: FetchError },
}
