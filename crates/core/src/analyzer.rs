// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Advisory insights from check durations and review state
//!
//! The analyzer keeps a short rolling history of how long each check took
//! (by check name) and compares running checks against it. Its output is
//! purely informational and never influences when a watch stops.

use crate::snapshot::{Mergeable, Snapshot};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::time::Duration;

/// Samples kept per check name
pub const HISTORY_LIMIT: usize = 10;
/// Samples required before comparing against the average
pub const MIN_SAMPLES: usize = 3;
/// Running longer than this is worth a warning
pub const VERY_SLOW: Duration = Duration::from_secs(20 * 60);
/// Running longer than this is worth a note
pub const SLOW: Duration = Duration::from_secs(10 * 60);
/// Factor over the historical average that counts as unusually slow
pub const SLOWDOWN_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightLevel {
    Warning,
    Info,
    Tip,
}

impl fmt::Display for InsightLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsightLevel::Warning => write!(f, "warning"),
            InsightLevel::Info => write!(f, "info"),
            InsightLevel::Tip => write!(f, "tip"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    pub level: InsightLevel,
    pub message: String,
}

impl Insight {
    fn new(level: InsightLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

#[derive(Debug, Default)]
struct CheckHistory {
    durations: VecDeque<Duration>,
}

impl CheckHistory {
    fn record(&mut self, duration: Duration) {
        if self.durations.len() == HISTORY_LIMIT {
            self.durations.pop_front();
        }
        self.durations.push_back(duration);
    }

    fn average(&self) -> Option<Duration> {
        if self.durations.len() < MIN_SAMPLES {
            return None;
        }
        let total: Duration = self.durations.iter().sum();
        Some(total / self.durations.len() as u32)
    }
}

/// Rolling per-check duration history plus insight rules
#[derive(Debug, Default)]
pub struct TrendAnalyzer {
    history: HashMap<String, CheckHistory>,
    /// Completion time of the last run learned per (pull request, check),
    /// so a finished run seen on several polls is only counted once
    learned: HashMap<(u64, String), DateTime<Utc>>,
}

impl TrendAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observed duration for `check`, evicting the oldest sample
    /// once the history is full
    pub fn record(&mut self, check: &str, duration: Duration) {
        self.history
            .entry(check.to_string())
            .or_default()
            .record(duration);
    }

    /// Recorded durations for `check`, oldest first
    pub fn history(&self, check: &str) -> Vec<Duration> {
        self.history
            .get(check)
            .map(|h| h.durations.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn average(&self, check: &str) -> Option<Duration> {
        self.history.get(check).and_then(CheckHistory::average)
    }

    /// Fold finished runs into the history, then derive insights.
    ///
    /// Elapsed times are measured against `snapshot.fetched_at`.
    pub fn analyze(&mut self, snapshot: &Snapshot) -> Vec<Insight> {
        self.learn(snapshot);

        let mut insights = Vec::new();
        insights.extend(self.running_checks(snapshot));
        insights.extend(review_insights(snapshot));
        insights.extend(merge_insights(snapshot));
        insights
    }

    fn learn(&mut self, snapshot: &Snapshot) {
        for check in &snapshot.checks {
            let (Some(duration), Some(completed)) = (check.duration(), check.completed_at) else {
                continue;
            };
            let Ok(duration) = duration.to_std() else {
                continue;
            };
            let key = (snapshot.number, check.name.clone());
            if self.learned.get(&key) == Some(&completed) {
                continue;
            }
            self.learned.insert(key, completed);
            self.record(&check.name, duration);
        }
    }

    fn running_checks(&self, snapshot: &Snapshot) -> Vec<Insight> {
        let mut insights = Vec::new();

        for check in snapshot.checks.iter().filter(|c| c.is_running()) {
            let Some(started) = check.started_at else {
                continue;
            };
            let Ok(elapsed) = (snapshot.fetched_at - started).to_std() else {
                continue;
            };

            if elapsed > VERY_SLOW {
                insights.push(Insight::new(
                    InsightLevel::Warning,
                    format!(
                        "{} has been running for {}, which is very slow",
                        check.name,
                        format_minutes(elapsed)
                    ),
                ));
            } else if elapsed > SLOW {
                insights.push(Insight::new(
                    InsightLevel::Info,
                    format!(
                        "{} has been running for {}",
                        check.name,
                        format_minutes(elapsed)
                    ),
                ));
            }

            if let Some(average) = self.average(&check.name) {
                if elapsed.as_secs_f64() > average.as_secs_f64() * SLOWDOWN_FACTOR {
                    insights.push(Insight::new(
                        InsightLevel::Warning,
                        format!(
                            "{} is taking longer than usual ({} vs {} average)",
                            check.name,
                            format_minutes(elapsed),
                            format_minutes(average)
                        ),
                    ));
                }
            }
        }

        insights
    }
}

/// Advice needs at least one check that actually passed; an empty check
/// list is not treated as green here
fn all_checks_passed(snapshot: &Snapshot) -> bool {
    !snapshot.checks.is_empty() && snapshot.checks_pass()
}

fn review_insights(snapshot: &Snapshot) -> Vec<Insight> {
    let mut insights = Vec::new();

    if all_checks_passed(snapshot) && snapshot.reviews.is_empty() {
        insights.push(Insight::new(
            InsightLevel::Tip,
            "All checks passed but nobody has reviewed yet; consider requesting a review",
        ));
    }
    if snapshot.has_approval() && !snapshot.checks_pass() {
        insights.push(Insight::new(
            InsightLevel::Info,
            "Approved, but not all checks are passing yet",
        ));
    }
    let changes = snapshot.changes_requested();
    if changes > 0 {
        insights.push(Insight::new(
            InsightLevel::Info,
            format!(
                "{} review{} requesting changes",
                changes,
                if changes == 1 { "" } else { "s" }
            ),
        ));
    }

    insights
}

fn merge_insights(snapshot: &Snapshot) -> Vec<Insight> {
    let mut insights = Vec::new();

    if all_checks_passed(snapshot)
        && snapshot.has_approval()
        && snapshot.mergeable != Mergeable::Conflicting
        && !snapshot.is_draft
    {
        insights.push(Insight::new(InsightLevel::Info, "Ready to merge"));
    }
    if snapshot.mergeable == Mergeable::Conflicting {
        insights.push(Insight::new(
            InsightLevel::Warning,
            "Merge conflicts must be resolved before merging",
        ));
    }
    if snapshot.is_draft && all_checks_passed(snapshot) {
        insights.push(Insight::new(
            InsightLevel::Tip,
            "Still a draft although all checks pass; mark it ready for review",
        ));
    }

    insights
}

/// Whole minutes, or seconds below one minute
fn format_minutes(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        return humantime::format_duration(Duration::from_secs(secs)).to_string();
    }
    humantime::format_duration(Duration::from_secs(secs - secs % 60)).to_string()
}

#[cfg(test)]
#[path = "analyzer_tests.rs"]
mod tests;
