// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Strict decoding of `gh pr view --json` output
//!
//! Raw payload structs mirror the CLI output loosely; everything is then
//! mapped onto the typed snapshot model. Unknown enum strings are errors,
//! never silently defaulted.

use chrono::{DateTime, Datelike, Utc};
use pw_core::{
    CheckConclusion, CheckRun, CheckStatus, Comment, Mergeable, PrState, Review, ReviewState,
    Snapshot,
};
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Json(String),
    #[error("unknown {field} value: {value:?}")]
    UnknownValue { field: &'static str, value: String },
    #[error("invalid timestamp {value:?} in {field}")]
    Timestamp { field: &'static str, value: String },
}

impl ParseError {
    fn unknown(field: &'static str, value: &str) -> Self {
        Self::UnknownValue {
            field,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPrView {
    number: u64,
    title: String,
    state: String,
    #[serde(default)]
    is_draft: bool,
    #[serde(default)]
    mergeable: Option<String>,
    #[serde(default)]
    status_check_rollup: Vec<RawRollupEntry>,
    #[serde(default)]
    reviews: Vec<RawReview>,
    #[serde(default)]
    comments: Vec<RawComment>,
    #[serde(default)]
    review_requests: Vec<RawReviewRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
enum RawRollupEntry {
    CheckRun(RawCheckRun),
    StatusContext(RawStatusContext),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCheckRun {
    name: String,
    status: String,
    #[serde(default)]
    conclusion: Option<String>,
    #[serde(default)]
    started_at: Option<String>,
    #[serde(default)]
    completed_at: Option<String>,
}

/// Legacy commit status
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStatusContext {
    context: String,
    state: String,
    #[serde(default)]
    started_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAuthor {
    login: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReview {
    id: String,
    #[serde(default)]
    author: Option<RawAuthor>,
    state: String,
    #[serde(default)]
    submitted_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawComment {
    id: String,
    #[serde(default)]
    author: Option<RawAuthor>,
    #[serde(default)]
    body: String,
    #[serde(default)]
    created_at: Option<String>,
}

/// A user (`login`) or a team (`name`)
#[derive(Debug, Deserialize)]
struct RawReviewRequest {
    #[serde(default)]
    login: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Decode `gh pr view` JSON into a snapshot stamped with `fetched_at`
pub fn parse_pr_view(json: &str, fetched_at: DateTime<Utc>) -> Result<Snapshot, ParseError> {
    let raw: RawPrView = serde_json::from_str(json).map_err(|e| ParseError::Json(e.to_string()))?;

    let mut snapshot = Snapshot::new(raw.number, raw.title, fetched_at);
    snapshot.state = parse_state(&raw.state)?;
    snapshot.is_draft = raw.is_draft;
    snapshot.mergeable = parse_mergeable(raw.mergeable.as_deref())?;

    let mut checks = Vec::with_capacity(raw.status_check_rollup.len());
    for entry in raw.status_check_rollup {
        checks.push(match entry {
            RawRollupEntry::CheckRun(run) => parse_check_run(run)?,
            RawRollupEntry::StatusContext(status) => parse_status_context(status)?,
        });
    }
    snapshot.checks = collapse_reruns(checks);

    for review in raw.reviews {
        let state = parse_review_state(&review.state)?;
        let mut parsed = Review::new(review.id, login(review.author), state);
        parsed.submitted_at = parse_time("submittedAt", review.submitted_at.as_deref())?;
        snapshot.reviews.push(parsed);
    }

    for comment in raw.comments {
        let mut parsed = Comment::new(comment.id, login(comment.author), comment.body);
        parsed.created_at = parse_time("createdAt", comment.created_at.as_deref())?;
        snapshot.comments.push(parsed);
    }

    snapshot.requested_reviewers = raw
        .review_requests
        .into_iter()
        .filter_map(|r| r.login.or(r.name))
        .collect();

    Ok(snapshot)
}

fn parse_state(value: &str) -> Result<PrState, ParseError> {
    match value {
        "OPEN" => Ok(PrState::Open),
        "CLOSED" => Ok(PrState::Closed),
        "MERGED" => Ok(PrState::Merged),
        other => Err(ParseError::unknown("state", other)),
    }
}

fn parse_mergeable(value: Option<&str>) -> Result<Mergeable, ParseError> {
    match value.unwrap_or("UNKNOWN") {
        "MERGEABLE" => Ok(Mergeable::Mergeable),
        "CONFLICTING" => Ok(Mergeable::Conflicting),
        "UNKNOWN" | "" => Ok(Mergeable::Unknown),
        other => Err(ParseError::unknown("mergeable", other)),
    }
}

fn parse_check_run(raw: RawCheckRun) -> Result<CheckRun, ParseError> {
    let status = match raw.status.as_str() {
        "QUEUED" | "PENDING" | "WAITING" | "REQUESTED" => CheckStatus::Pending,
        "IN_PROGRESS" => CheckStatus::InProgress,
        "COMPLETED" => CheckStatus::Completed,
        other => return Err(ParseError::unknown("check status", other)),
    };
    let conclusion = match raw.conclusion.as_deref().unwrap_or("") {
        "" => None,
        "SUCCESS" => Some(CheckConclusion::Success),
        "FAILURE" | "TIMED_OUT" | "ACTION_REQUIRED" | "STARTUP_FAILURE" => {
            Some(CheckConclusion::Failure)
        }
        "NEUTRAL" | "STALE" => Some(CheckConclusion::Neutral),
        "CANCELLED" => Some(CheckConclusion::Cancelled),
        "SKIPPED" => Some(CheckConclusion::Skipped),
        other => return Err(ParseError::unknown("check conclusion", other)),
    };

    Ok(CheckRun {
        name: raw.name,
        status,
        conclusion,
        started_at: parse_time("startedAt", raw.started_at.as_deref())?,
        completed_at: parse_time("completedAt", raw.completed_at.as_deref())?,
    })
}

fn parse_status_context(raw: RawStatusContext) -> Result<CheckRun, ParseError> {
    let (status, conclusion) = match raw.state.as_str() {
        "SUCCESS" => (CheckStatus::Completed, Some(CheckConclusion::Success)),
        "FAILURE" | "ERROR" => (CheckStatus::Completed, Some(CheckConclusion::Failure)),
        "PENDING" | "EXPECTED" => (CheckStatus::Pending, None),
        other => return Err(ParseError::unknown("status context state", other)),
    };

    Ok(CheckRun {
        name: raw.context,
        status,
        conclusion,
        started_at: parse_time("startedAt", raw.started_at.as_deref())?,
        completed_at: None,
    })
}

fn parse_review_state(value: &str) -> Result<ReviewState, ParseError> {
    match value {
        "APPROVED" => Ok(ReviewState::Approved),
        "CHANGES_REQUESTED" => Ok(ReviewState::ChangesRequested),
        "COMMENTED" => Ok(ReviewState::Commented),
        "DISMISSED" => Ok(ReviewState::Dismissed),
        "PENDING" => Ok(ReviewState::Pending),
        other => Err(ParseError::unknown("review state", other)),
    }
}

/// Missing, empty and zero-valued (`0001-01-01T00:00:00Z`) timestamps are absent
fn parse_time(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, ParseError> {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let parsed = DateTime::parse_from_rfc3339(value).map_err(|_| ParseError::Timestamp {
        field,
        value: value.to_string(),
    })?;
    if parsed.year() <= 1 {
        return Ok(None);
    }
    Ok(Some(parsed.with_timezone(&Utc)))
}

/// Deleted accounts come back without an author
fn login(author: Option<RawAuthor>) -> String {
    author.map_or_else(|| "ghost".to_string(), |a| a.login)
}

/// Keep one entry per check name: the last one reported, at the position
/// the name was first seen
fn collapse_reruns(checks: Vec<CheckRun>) -> Vec<CheckRun> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<CheckRun> = Vec::with_capacity(checks.len());
    for check in checks {
        match positions.get(&check.name) {
            Some(&index) => unique[index] = check,
            None => {
                positions.insert(check.name.clone(), unique.len());
                unique.push(check);
            }
        }
    }
    unique
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
