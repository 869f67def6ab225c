// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Point-in-time observation of a pull request
//!
//! A `Snapshot` is pure data. It is produced by a fetcher, compared against
//! its predecessor by the change detector, and then discarded once the next
//! successful fetch for the same pull request replaces it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrState {
    Open,
    Closed,
    Merged,
}

impl PrState {
    /// Merged and closed pull requests will not change again
    pub fn is_terminal(self) -> bool {
        matches!(self, PrState::Merged | PrState::Closed)
    }
}

impl fmt::Display for PrState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrState::Open => write!(f, "OPEN"),
            PrState::Closed => write!(f, "CLOSED"),
            PrState::Merged => write!(f, "MERGED"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mergeable {
    Mergeable,
    Conflicting,
    Unknown,
}

impl fmt::Display for Mergeable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mergeable::Mergeable => write!(f, "MERGEABLE"),
            Mergeable::Conflicting => write!(f, "CONFLICTING"),
            Mergeable::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckConclusion {
    Success,
    Failure,
    Neutral,
    Cancelled,
    Skipped,
}

impl CheckConclusion {
    /// Conclusions that do not block a pull request
    pub fn is_passing(self) -> bool {
        matches!(
            self,
            CheckConclusion::Success | CheckConclusion::Skipped | CheckConclusion::Neutral
        )
    }
}

impl fmt::Display for CheckConclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckConclusion::Success => "success",
            CheckConclusion::Failure => "failure",
            CheckConclusion::Neutral => "neutral",
            CheckConclusion::Cancelled => "cancelled",
            CheckConclusion::Skipped => "skipped",
        };
        write!(f, "{}", s)
    }
}

/// One named CI check. Identity across snapshots is the name alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRun {
    pub name: String,
    pub status: CheckStatus,
    pub conclusion: Option<CheckConclusion>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl CheckRun {
    pub fn new(name: impl Into<String>, status: CheckStatus) -> Self {
        Self {
            name: name.into(),
            status,
            conclusion: None,
            started_at: None,
            completed_at: None,
        }
    }

    pub fn with_conclusion(mut self, conclusion: CheckConclusion) -> Self {
        self.conclusion = Some(conclusion);
        self
    }

    pub fn started(mut self, at: DateTime<Utc>) -> Self {
        self.started_at = Some(at);
        self
    }

    pub fn completed(mut self, at: DateTime<Utc>) -> Self {
        self.completed_at = Some(at);
        self
    }

    /// Queued or running
    pub fn is_running(&self) -> bool {
        self.status != CheckStatus::Completed
    }

    pub fn is_passing(&self) -> bool {
        self.conclusion.is_some_and(CheckConclusion::is_passing)
    }

    pub fn is_failing(&self) -> bool {
        self.conclusion == Some(CheckConclusion::Failure)
    }

    /// Wall time between start and completion, when both are known
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) if end >= start => Some(end - start),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
    Pending,
}

impl fmt::Display for ReviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReviewState::Approved => "APPROVED",
            ReviewState::ChangesRequested => "CHANGES_REQUESTED",
            ReviewState::Commented => "COMMENTED",
            ReviewState::Dismissed => "DISMISSED",
            ReviewState::Pending => "PENDING",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub author: String,
    pub state: ReviewState,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Review {
    pub fn new(id: impl Into<String>, author: impl Into<String>, state: ReviewState) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            state,
            submitted_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub body: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn new(id: impl Into<String>, author: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            body: body.into(),
            created_at: None,
        }
    }
}

/// Observed state of one pull request at `fetched_at`
///
/// Check names are unique within `checks`; the fetch boundary enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub number: u64,
    pub title: String,
    pub state: PrState,
    pub is_draft: bool,
    pub mergeable: Mergeable,
    pub checks: Vec<CheckRun>,
    pub reviews: Vec<Review>,
    pub comments: Vec<Comment>,
    pub requested_reviewers: Vec<String>,
    pub fetched_at: DateTime<Utc>,
}

/// Check counts for status lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckCounts {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pending: usize,
}

impl Snapshot {
    /// An open, mergeable, non-draft pull request with nothing attached
    pub fn new(number: u64, title: impl Into<String>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            number,
            title: title.into(),
            state: PrState::Open,
            is_draft: false,
            mergeable: Mergeable::Mergeable,
            checks: Vec::new(),
            reviews: Vec::new(),
            comments: Vec::new(),
            requested_reviewers: Vec::new(),
            fetched_at,
        }
    }

    pub fn check(&self, name: &str) -> Option<&CheckRun> {
        self.checks.iter().find(|c| c.name == name)
    }

    pub fn has_review(&self, id: &str) -> bool {
        self.reviews.iter().any(|r| r.id == id)
    }

    pub fn has_comment(&self, id: &str) -> bool {
        self.comments.iter().any(|c| c.id == id)
    }

    /// Every check concluded success, skipped or neutral.
    ///
    /// Vacuously true when there are no checks.
    pub fn checks_pass(&self) -> bool {
        self.checks.iter().all(CheckRun::is_passing)
    }

    pub fn has_approval(&self) -> bool {
        self.reviews
            .iter()
            .any(|r| r.state == ReviewState::Approved)
    }

    pub fn changes_requested(&self) -> usize {
        self.reviews
            .iter()
            .filter(|r| r.state == ReviewState::ChangesRequested)
            .count()
    }

    pub fn check_counts(&self) -> CheckCounts {
        let mut counts = CheckCounts {
            total: self.checks.len(),
            ..CheckCounts::default()
        };
        for check in &self.checks {
            match check.conclusion {
                Some(c) if c.is_passing() => counts.passed += 1,
                Some(_) => counts.failed += 1,
                None => counts.pending += 1,
            }
        }
        counts
    }

    /// One-line state summary used for baselines and heartbeats
    pub fn summary_line(&self) -> String {
        let counts = self.check_counts();
        let mut line = format!(
            "{} checks ({} passed, {} failed, {} pending), {} reviews, {} comments, state {}",
            counts.total,
            counts.passed,
            counts.failed,
            counts.pending,
            self.reviews.len(),
            self.comments.len(),
            self.state,
        );
        if self.is_draft {
            line.push_str(", draft");
        }
        line
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
