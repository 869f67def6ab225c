// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification filtering
//!
//! Decides which detected events are reported and forwarded to sinks.
//! Lifecycle events (status and conflict) always pass.

use super::ConfigError;
use crate::event::{Event, EventKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which event categories to report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotifyFilter {
    #[default]
    All,
    Checks,
    Reviews,
    Comments,
}

impl NotifyFilter {
    pub const ALL: [NotifyFilter; 4] = [
        NotifyFilter::All,
        NotifyFilter::Checks,
        NotifyFilter::Reviews,
        NotifyFilter::Comments,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NotifyFilter::All => "all",
            NotifyFilter::Checks => "checks",
            NotifyFilter::Reviews => "reviews",
            NotifyFilter::Comments => "comments",
        }
    }

    /// Check if an event passes this filter
    pub fn allows(self, event: &Event) -> bool {
        match (self, event.kind) {
            (NotifyFilter::All, _) => true,
            (_, EventKind::Status | EventKind::Conflict) => true,
            (NotifyFilter::Checks, kind) => kind == EventKind::Check,
            (NotifyFilter::Reviews, kind) => kind == EventKind::Review,
            (NotifyFilter::Comments, kind) => kind == EventKind::Comment,
        }
    }
}

impl fmt::Display for NotifyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotifyFilter {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownValue {
                field: "notify filter",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
