// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The textual report every watch session returns

use chrono::{DateTime, Utc};
use pw_core::{Event, Severity, StopCondition};
use std::collections::BTreeMap;
use std::fmt;

/// Receives each report line as it is written
pub type ProgressFn = Box<dyn FnMut(&str) + Send>;

/// Why a watch session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    ConditionMet(StopCondition),
    /// No stop condition was declared and nothing is left to wait for
    Quiescent,
    AllComplete,
    MaxIterations,
    /// Too many consecutive fetch failures
    Unhealthy,
    ResolutionFailed,
}

impl fmt::Display for WatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchOutcome::ConditionMet(c) => write!(f, "stop condition {} met", c),
            WatchOutcome::Quiescent => write!(f, "nothing left to wait for"),
            WatchOutcome::AllComplete => write!(f, "all pull requests complete"),
            WatchOutcome::MaxIterations => write!(f, "iteration limit reached"),
            WatchOutcome::Unhealthy => write!(f, "connection unhealthy"),
            WatchOutcome::ResolutionFailed => write!(f, "could not resolve identifiers"),
        }
    }
}

/// Event counts by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventSummary {
    pub total: usize,
    pub success: usize,
    pub error: usize,
    pub warning: usize,
    pub info: usize,
}

impl EventSummary {
    fn add(&mut self, event: &Event) {
        self.total += 1;
        match event.severity {
            Severity::Success => self.success += 1,
            Severity::Error => self.error += 1,
            Severity::Warning => self.warning += 1,
            Severity::Info => self.info += 1,
        }
    }
}

impl fmt::Display for EventSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} events ({} success, {} error, {} warning, {} info)",
            self.total, self.success, self.error, self.warning, self.info
        )
    }
}

#[derive(Default)]
pub struct WatchReport {
    lines: Vec<String>,
    events: BTreeMap<u64, Vec<Event>>,
    iterations: u32,
    outcome: Option<WatchOutcome>,
    progress: Option<ProgressFn>,
}

impl fmt::Debug for WatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchReport")
            .field("lines", &self.lines)
            .field("events", &self.events)
            .field("iterations", &self.iterations)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

impl WatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(mut self, progress: Option<ProgressFn>) -> Self {
        self.progress = progress;
        self
    }

    /// A report for a session that never started because its input could
    /// not be resolved
    pub fn resolution_failed(at: DateTime<Utc>, message: impl fmt::Display) -> Self {
        let mut report = Self::new();
        report.line(at, format!("Error: {}", message));
        report.finish(WatchOutcome::ResolutionFailed);
        report
    }

    /// Append a timestamped line and stream it to the progress callback
    pub fn line(&mut self, at: DateTime<Utc>, text: impl AsRef<str>) {
        let line = format!("[{}] {}", at.format("%H:%M:%S"), text.as_ref());
        if let Some(progress) = self.progress.as_mut() {
            progress(&line);
        }
        self.lines.push(line);
    }

    /// Append to the event log of `pr`. The log only ever grows.
    pub fn record_events(&mut self, pr: u64, events: &[Event]) {
        self.events.entry(pr).or_default().extend_from_slice(events);
    }

    pub(crate) fn set_iterations(&mut self, iterations: u32) {
        self.iterations = iterations;
    }

    pub(crate) fn finish(&mut self, outcome: WatchOutcome) {
        self.outcome = Some(outcome);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn events(&self, pr: u64) -> &[Event] {
        self.events.get(&pr).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn all_events(&self) -> impl Iterator<Item = (u64, &Event)> {
        self.events
            .iter()
            .flat_map(|(pr, events)| events.iter().map(move |e| (*pr, e)))
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn outcome(&self) -> Option<WatchOutcome> {
        self.outcome
    }

    /// Counts come from each event's severity, never from its message text
    pub fn summary(&self) -> EventSummary {
        let mut summary = EventSummary::default();
        for (_, event) in self.all_events() {
            summary.add(event);
        }
        summary
    }

    /// Closing lines: outcome, iteration count and event counts
    pub fn footer(&self) -> String {
        let outcome = self
            .outcome
            .map_or_else(|| "unfinished".to_string(), |o| o.to_string());
        format!(
            "Finished after {} iteration{}: {}. {}",
            self.iterations,
            if self.iterations == 1 { "" } else { "s" },
            outcome,
            self.summary()
        )
    }
}

impl fmt::Display for WatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        write!(f, "{}", self.footer())
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
