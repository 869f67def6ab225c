// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Change detection between two snapshots
//!
//! `detect_changes` is a pure function: it reads nothing but its two
//! arguments and equal inputs always produce equal output.
//!
//! The first observation yields exactly one status event summarizing the
//! pull request. After that, four passes run in a fixed order (checks,
//! reviews, comments, status) and their outputs are concatenated. Status
//! transitions only fire in the "becomes true" direction: a conflict being
//! resolved or a pull request being reopened produces nothing.

use crate::event::{Event, EventDetail, EventKind, Severity};
use crate::snapshot::{CheckConclusion, CheckStatus, Mergeable, PrState, ReviewState, Snapshot};

/// Maximum number of characters of a comment body quoted in its event
pub const COMMENT_PREVIEW_CHARS: usize = 100;

/// Diff two observations of the same pull request
pub fn detect_changes(previous: Option<&Snapshot>, current: &Snapshot) -> Vec<Event> {
    let Some(previous) = previous else {
        return vec![baseline(current)];
    };

    let mut events = Vec::new();
    events.extend(check_transitions(previous, current));
    events.extend(new_reviews(previous, current));
    events.extend(new_comments(previous, current));
    events.extend(status_transitions(previous, current));
    events
}

fn baseline(current: &Snapshot) -> Event {
    Event::new(
        EventKind::Status,
        Severity::Info,
        format!("Watching PR #{}: {}", current.number, current.summary_line()),
        current.fetched_at,
    )
}

fn check_transitions(previous: &Snapshot, current: &Snapshot) -> Vec<Event> {
    let at = current.fetched_at;
    let mut events = Vec::new();

    for check in &current.checks {
        match previous.check(&check.name) {
            None if check.status == CheckStatus::Pending => {
                events.push(
                    Event::new(
                        EventKind::Check,
                        Severity::Info,
                        format!("Check started: {}", check.name),
                        at,
                    )
                    .with_detail(EventDetail::Check(check.clone())),
                );
            }
            None => {}
            Some(before) => {
                let Some(conclusion) = check.conclusion else {
                    continue;
                };
                if before.conclusion == Some(conclusion) {
                    continue;
                }
                let (severity, verb) = match conclusion {
                    CheckConclusion::Success => (Severity::Success, "passed"),
                    CheckConclusion::Failure => (Severity::Error, "failed"),
                    _ => (Severity::Warning, "finished"),
                };
                events.push(
                    Event::new(
                        EventKind::Check,
                        severity,
                        format!("Check {}: {} ({})", verb, check.name, conclusion),
                        at,
                    )
                    .with_detail(EventDetail::Check(check.clone())),
                );
            }
        }
    }

    events
}

fn new_reviews(previous: &Snapshot, current: &Snapshot) -> Vec<Event> {
    current
        .reviews
        .iter()
        .filter(|review| !previous.has_review(&review.id))
        .map(|review| {
            let severity = if review.state == ReviewState::Approved {
                Severity::Success
            } else {
                Severity::Info
            };
            Event::new(
                EventKind::Review,
                severity,
                format!("Review from {}: {}", review.author, review.state),
                current.fetched_at,
            )
            .with_detail(EventDetail::Review(review.clone()))
        })
        .collect()
}

fn new_comments(previous: &Snapshot, current: &Snapshot) -> Vec<Event> {
    current
        .comments
        .iter()
        .filter(|comment| !previous.has_comment(&comment.id))
        .map(|comment| {
            Event::new(
                EventKind::Comment,
                Severity::Info,
                format!(
                    "Comment from {}: {}",
                    comment.author,
                    preview(&comment.body, COMMENT_PREVIEW_CHARS)
                ),
                current.fetched_at,
            )
            .with_detail(EventDetail::Comment(comment.clone()))
        })
        .collect()
}

fn status_transitions(previous: &Snapshot, current: &Snapshot) -> Vec<Event> {
    let at = current.fetched_at;
    let mut events = Vec::new();

    if previous.is_draft && !current.is_draft {
        events.push(Event::new(
            EventKind::Status,
            Severity::Info,
            "PR is ready for review",
            at,
        ));
    }
    if previous.state != PrState::Merged && current.state == PrState::Merged {
        events.push(Event::new(
            EventKind::Status,
            Severity::Success,
            "PR was merged",
            at,
        ));
    }
    if previous.state != PrState::Closed && current.state == PrState::Closed {
        events.push(Event::new(
            EventKind::Status,
            Severity::Warning,
            "PR was closed",
            at,
        ));
    }
    if previous.mergeable != Mergeable::Conflicting && current.mergeable == Mergeable::Conflicting
    {
        events.push(Event::new(
            EventKind::Conflict,
            Severity::Warning,
            "PR has merge conflicts",
            at,
        ));
    }

    events
}

/// First `max_chars` characters of `body` on one line, with an ellipsis when cut
fn preview(body: &str, max_chars: usize) -> String {
    let flat: String = body
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    let flat = flat.trim();
    if flat.chars().count() <= max_chars {
        return flat.to_string();
    }
    let mut cut: String = flat.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
