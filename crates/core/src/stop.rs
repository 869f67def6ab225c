// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stop conditions for a watch session

use crate::config::ConfigError;
use crate::snapshot::{PrState, Snapshot};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user-declared predicate that ends a watch session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopCondition {
    /// Every check concluded success, skipped or neutral
    ChecksPass,
    /// At least one approving review
    Approved,
    Merged,
    /// Closed or merged
    Closed,
}

impl StopCondition {
    pub const ALL: [StopCondition; 4] = [
        StopCondition::ChecksPass,
        StopCondition::Approved,
        StopCondition::Merged,
        StopCondition::Closed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StopCondition::ChecksPass => "checks-pass",
            StopCondition::Approved => "approved",
            StopCondition::Merged => "merged",
            StopCondition::Closed => "closed",
        }
    }
}

impl fmt::Display for StopCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StopCondition {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownValue {
                field: "stop condition",
                value: s.to_string(),
            })
    }
}

/// Whether `snapshot` satisfies the declared condition.
///
/// `None` never stops; the caller falls back to [`is_quiescent`] and the
/// iteration cap.
pub fn should_stop(snapshot: &Snapshot, condition: Option<StopCondition>) -> bool {
    match condition {
        Some(StopCondition::ChecksPass) => snapshot.checks_pass(),
        Some(StopCondition::Approved) => snapshot.has_approval(),
        Some(StopCondition::Merged) => snapshot.state == PrState::Merged,
        Some(StopCondition::Closed) => snapshot.state.is_terminal(),
        None => false,
    }
}

/// Nothing left to wait for: terminal, or passing checks with an approval.
///
/// A pull request with no checks and no reviews is never quiescent.
pub fn is_quiescent(snapshot: &Snapshot) -> bool {
    snapshot.state.is_terminal() || (snapshot.checks_pass() && snapshot.has_approval())
}

#[cfg(test)]
#[path = "stop_tests.rs"]
mod tests;
