// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single pull request watch loop

use crate::notifier::Notifier;
use crate::report::{ProgressFn, WatchOutcome, WatchReport};
use pw_adapters::{NotifyAdapter, SnapshotFetcher};
use pw_core::{
    detect_changes, is_quiescent, should_stop, Clock, Event, Health, RetryExecutor, Snapshot,
    TrendAnalyzer, WatchConfig,
};

/// External collaborators of a watch session
pub struct WatchDeps<F, N, C> {
    pub fetcher: F,
    pub notify: N,
    pub clock: C,
}

pub struct Watcher<F, N, C: Clock> {
    fetcher: F,
    notifier: Notifier<N>,
    clock: C,
    config: WatchConfig,
    retry: RetryExecutor<C>,
    analyzer: TrendAnalyzer,
    progress: Option<ProgressFn>,
}

impl<F, N, C> Watcher<F, N, C>
where
    F: SnapshotFetcher,
    N: NotifyAdapter,
    C: Clock,
{
    pub fn new(deps: WatchDeps<F, N, C>, config: WatchConfig) -> Self {
        Self {
            fetcher: deps.fetcher,
            notifier: Notifier::new(deps.notify),
            retry: RetryExecutor::new(config.retry.clone(), deps.clock.clone()),
            clock: deps.clock,
            config,
            analyzer: TrendAnalyzer::new(),
            progress: None,
        }
    }

    /// Stream report lines as they are written
    pub fn with_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_ticket(mut self, pr: u64, ticket: Option<String>) -> Self {
        if let Some(ticket) = ticket {
            self.notifier.set_ticket(pr, ticket);
        }
        self
    }

    /// Watch `pr` until a stop decision or the iteration cap.
    ///
    /// Never fails: fetch errors become report lines and error
    /// notifications.
    pub async fn run(mut self, pr: u64) -> WatchReport {
        let mut report = WatchReport::new().with_progress(self.progress.take());
        let label = format!("fetch PR #{}", pr);
        let max = self.config.max_iterations;
        let mut previous: Option<Snapshot> = None;
        let mut outcome = WatchOutcome::MaxIterations;

        tracing::info!(pr, max_iterations = max, "watch started");
        report.line(
            self.clock.now(),
            format!(
                "Watching PR #{} every {}s (up to {} iterations)",
                pr,
                self.config.interval.as_secs(),
                max
            ),
        );

        for iteration in 1..=max {
            report.set_iterations(iteration);

            let fetcher = &self.fetcher;
            let fetched = self.retry.execute(&label, move || fetcher.fetch(pr)).await;

            let current = match fetched {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    report.line(self.clock.now(), format!("Error: {}", e));
                    self.notifier
                        .error(Some(pr), format!("PR #{} fetch failed", pr), e.to_string());
                    if self.retry.health() == Health::Unhealthy {
                        report.line(
                            self.clock.now(),
                            format!(
                                "Stopping: {} consecutive fetch failures",
                                self.retry.consecutive_failures()
                            ),
                        );
                        outcome = WatchOutcome::Unhealthy;
                        break;
                    }
                    self.pause(iteration).await;
                    continue;
                }
            };

            let events = detect_changes(previous.as_ref(), &current);
            report.record_events(pr, &events);
            let visible: Vec<&Event> = events
                .iter()
                .filter(|e| self.config.notify_filter.allows(e))
                .collect();
            for event in &visible {
                report.line(event.timestamp, event.to_string());
                self.notifier.event(pr, event);
            }

            if visible.is_empty() && every(iteration, self.config.heartbeat_every) {
                report.line(
                    self.clock.now(),
                    format!(
                        "Still watching PR #{} (iteration {}/{}): {}",
                        pr,
                        iteration,
                        max,
                        current.summary_line()
                    ),
                );
            }

            if every(iteration, self.config.analyze_every) {
                for insight in self.analyzer.analyze(&current) {
                    report.line(self.clock.now(), format!("Insight {}", insight));
                }
            }

            if let Some(stop) = self.stop_decision(&current) {
                let text = format!("{}: {}", stop, current.summary_line());
                report.line(self.clock.now(), format!("Stopping, {}", text));
                self.notifier.summary(pr, text);
                outcome = stop;
                break;
            }

            previous = Some(current);
            self.pause(iteration).await;
        }

        if outcome == WatchOutcome::MaxIterations {
            report.line(
                self.clock.now(),
                format!("Stopping after {} iterations without a stop decision", max),
            );
        }

        tracing::info!(pr, %outcome, iterations = report.iterations(), "watch finished");
        report.finish(outcome);
        self.notifier.flush().await;
        report
    }

    fn stop_decision(&self, snapshot: &Snapshot) -> Option<WatchOutcome> {
        match self.config.stop_condition {
            Some(condition) => should_stop(snapshot, Some(condition))
                .then_some(WatchOutcome::ConditionMet(condition)),
            None => is_quiescent(snapshot).then_some(WatchOutcome::Quiescent),
        }
    }

    /// Sleep between iterations, but not after the last one
    async fn pause(&self, iteration: u32) {
        if iteration < self.config.max_iterations {
            self.clock.sleep(self.config.interval).await;
        }
    }
}

/// True on every `n`th iteration; never when `n` is zero
pub(crate) fn every(iteration: u32, n: u32) -> bool {
    n != 0 && iteration % n == 0
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
