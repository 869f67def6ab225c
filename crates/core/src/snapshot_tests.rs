// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

fn snapshot() -> Snapshot {
    Snapshot::new(42, "Add feature", Utc::now())
}

#[test]
fn check_counts_classify_by_conclusion() {
    let mut snap = snapshot();
    snap.checks = vec![
        CheckRun::new("build", CheckStatus::Completed).with_conclusion(CheckConclusion::Success),
        CheckRun::new("lint", CheckStatus::Completed).with_conclusion(CheckConclusion::Skipped),
        CheckRun::new("test", CheckStatus::Completed).with_conclusion(CheckConclusion::Failure),
        CheckRun::new("e2e", CheckStatus::InProgress),
        CheckRun::new("deploy", CheckStatus::Pending),
    ];

    assert_eq!(
        snap.check_counts(),
        CheckCounts {
            total: 5,
            passed: 2,
            failed: 1,
            pending: 2,
        }
    );
}

#[parameterized(
    success = { CheckConclusion::Success, true },
    skipped = { CheckConclusion::Skipped, true },
    neutral = { CheckConclusion::Neutral, true },
    failure = { CheckConclusion::Failure, false },
    cancelled = { CheckConclusion::Cancelled, false },
)]
fn passing_conclusions(conclusion: CheckConclusion, passing: bool) {
    assert_eq!(conclusion.is_passing(), passing);
}

#[test]
fn checks_pass_is_vacuous_for_no_checks() {
    assert!(snapshot().checks_pass());
}

#[test]
fn pending_check_blocks_checks_pass() {
    let mut snap = snapshot();
    snap.checks = vec![
        CheckRun::new("build", CheckStatus::Completed).with_conclusion(CheckConclusion::Success),
        CheckRun::new("test", CheckStatus::Pending),
    ];
    assert!(!snap.checks_pass());
}

#[test]
fn approval_and_changes_requested() {
    let mut snap = snapshot();
    snap.reviews = vec![
        Review::new("r1", "alice", ReviewState::ChangesRequested),
        Review::new("r2", "bob", ReviewState::ChangesRequested),
        Review::new("r3", "carol", ReviewState::Commented),
    ];
    assert!(!snap.has_approval());
    assert_eq!(snap.changes_requested(), 2);

    snap.reviews.push(Review::new("r4", "dave", ReviewState::Approved));
    assert!(snap.has_approval());
}

#[test]
fn duration_requires_both_timestamps() {
    let start = Utc::now();
    let end = start + chrono::Duration::seconds(90);

    let check = CheckRun::new("build", CheckStatus::Completed).started(start);
    assert_eq!(check.duration(), None);

    let check = check.completed(end);
    assert_eq!(check.duration(), Some(chrono::Duration::seconds(90)));
}

#[test]
fn summary_line_mentions_counts_and_draft() {
    let mut snap = snapshot();
    snap.is_draft = true;
    snap.checks = vec![CheckRun::new("build", CheckStatus::Pending)];
    snap.comments = vec![Comment::new("c1", "alice", "hi")];

    let line = snap.summary_line();
    assert_eq!(
        line,
        "1 checks (0 passed, 0 failed, 1 pending), 0 reviews, 1 comments, state OPEN, draft"
    );
}

#[test]
fn terminal_states() {
    assert!(PrState::Merged.is_terminal());
    assert!(PrState::Closed.is_terminal());
    assert!(!PrState::Open.is_terminal());
}
