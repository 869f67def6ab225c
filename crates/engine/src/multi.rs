// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watch loop over several pull requests

use crate::coordinator::Coordinator;
use crate::notifier::Notifier;
use crate::report::{ProgressFn, WatchOutcome, WatchReport};
use crate::watch::{every, WatchDeps};
use pw_adapters::{NotifyAdapter, SnapshotFetcher};
use pw_core::{Clock, Health, RetryExecutor, TrendAnalyzer, WatchConfig};

pub struct MultiWatcher<F, N, C: Clock> {
    coordinator: Coordinator<F>,
    notifier: Notifier<N>,
    clock: C,
    config: WatchConfig,
    retry: RetryExecutor<C>,
    analyzer: TrendAnalyzer,
    progress: Option<ProgressFn>,
}

impl<F, N, C> MultiWatcher<F, N, C>
where
    F: SnapshotFetcher,
    N: NotifyAdapter,
    C: Clock,
{
    pub fn new(deps: WatchDeps<F, N, C>, config: WatchConfig) -> Self {
        Self {
            coordinator: Coordinator::new(deps.fetcher).with_stop_condition(config.stop_condition),
            notifier: Notifier::new(deps.notify),
            retry: RetryExecutor::new(config.retry.clone(), deps.clock.clone()),
            clock: deps.clock,
            config,
            analyzer: TrendAnalyzer::new(),
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_tickets(mut self, tickets: impl IntoIterator<Item = (u64, String)>) -> Self {
        for (pr, ticket) in tickets {
            self.notifier.set_ticket(pr, ticket);
        }
        self
    }

    /// Watch every pull request in `prs` until all are complete, the
    /// connection turns unhealthy, or the iteration cap is reached
    pub async fn run(mut self, prs: &[u64]) -> WatchReport {
        let mut report = WatchReport::new().with_progress(self.progress.take());
        let max = self.config.max_iterations;
        let mut outcome = WatchOutcome::MaxIterations;

        self.coordinator.initialize(prs);
        let list: Vec<String> = self
            .coordinator
            .states()
            .iter()
            .map(|s| format!("#{}", s.pr))
            .collect();
        tracing::info!(count = list.len(), max_iterations = max, "multi watch started");
        report.line(
            self.clock.now(),
            format!(
                "Watching {} PRs ({}) every {}s (up to {} iterations)",
                list.len(),
                list.join(", "),
                self.config.interval.as_secs(),
                max
            ),
        );

        for iteration in 1..=max {
            report.set_iterations(iteration);

            let pending = self.coordinator.pending();
            let coordinator = &self.coordinator;
            let ids = pending.as_slice();
            let fetched = self
                .retry
                .execute("fetch pending PRs", move || coordinator.fetch_pending(ids))
                .await;

            let cycle = match fetched {
                Ok(cycle) => cycle,
                Err(e) => {
                    report.line(self.clock.now(), format!("Error: {}", e));
                    self.notifier
                        .error(None, "Fetching pull requests failed", e.to_string());
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

            for (pr, e) in cycle.failures() {
                report.line(self.clock.now(), format!("Error fetching PR #{}: {}", pr, e));
            }

            let mut visible_count = 0;
            for update in self.coordinator.apply(cycle) {
                report.record_events(update.pr, &update.events);
                for event in update
                    .events
                    .iter()
                    .filter(|e| self.config.notify_filter.allows(e))
                {
                    visible_count += 1;
                    report.line(event.timestamp, format!("PR #{}: {}", update.pr, event));
                    self.notifier.event(update.pr, event);
                }
                if update.completed {
                    let text = self
                        .coordinator
                        .state(update.pr)
                        .and_then(|s| s.snapshot.as_ref())
                        .map(|s| s.summary_line())
                        .unwrap_or_default();
                    report.line(
                        self.clock.now(),
                        format!("PR #{} complete: {}", update.pr, text),
                    );
                    self.notifier.summary(update.pr, format!("Complete: {}", text));
                }
            }

            if visible_count == 0 && every(iteration, self.config.heartbeat_every) {
                let done = self.coordinator.states().len() - self.coordinator.pending().len();
                report.line(
                    self.clock.now(),
                    format!(
                        "Still watching (iteration {}/{}): {}/{} complete",
                        iteration,
                        max,
                        done,
                        self.coordinator.states().len()
                    ),
                );
            }

            if every(iteration, self.config.analyze_every) {
                self.analyze(&mut report);
            }

            if self.coordinator.are_all_complete() {
                outcome = WatchOutcome::AllComplete;
                report.line(self.clock.now(), "All pull requests complete");
                break;
            }

            self.pause(iteration).await;
        }

        if outcome == WatchOutcome::MaxIterations {
            report.line(
                self.clock.now(),
                format!("Stopping after {} iterations without a stop decision", max),
            );
        }

        tracing::info!(%outcome, iterations = report.iterations(), "multi watch finished");
        report.finish(outcome);
        self.notifier.flush().await;
        report
    }

    fn analyze(&mut self, report: &mut WatchReport) {
        let now = self.clock.now();
        for state in self.coordinator.states().iter().filter(|s| !s.complete) {
            let Some(snapshot) = &state.snapshot else {
                continue;
            };
            for insight in self.analyzer.analyze(snapshot) {
                report.line(now, format!("PR #{}: Insight {}", state.pr, insight));
            }
        }
    }

    async fn pause(&self, iteration: u32) {
        if iteration < self.config.max_iterations {
            self.clock.sleep(self.config.interval).await;
        }
    }
}

#[cfg(test)]
#[path = "multi_tests.rs"]
mod tests;
