// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared poll cycles over several pull requests
//!
//! A cycle is split in two so an outer retry can wrap the fetch: fetching
//! only reads coordinator state, and [`Coordinator::apply`] folds the
//! results in afterwards. Pull requests are fetched one after another.

use crate::error::CoordinatorError;
use pw_adapters::{FetchError, SnapshotFetcher};
use pw_core::{detect_changes, is_quiescent, should_stop, Event, Snapshot, StopCondition};

/// Per pull request state for one session
#[derive(Debug, Clone, PartialEq)]
pub struct WatchState {
    pub pr: u64,
    pub snapshot: Option<Snapshot>,
    /// Every event detected this session, in detection order
    pub events: Vec<Event>,
    /// Once set, stays set
    pub complete: bool,
    pub last_error: Option<FetchError>,
}

impl WatchState {
    fn new(pr: u64) -> Self {
        Self {
            pr,
            snapshot: None,
            events: Vec::new(),
            complete: false,
            last_error: None,
        }
    }
}

/// Fetch results of one cycle, in fetch order
#[derive(Debug, Clone, Default)]
pub struct FetchCycle {
    pub results: Vec<(u64, Result<Snapshot, FetchError>)>,
}

impl FetchCycle {
    pub fn failures(&self) -> impl Iterator<Item = (u64, &FetchError)> {
        self.results
            .iter()
            .filter_map(|(pr, r)| r.as_ref().err().map(|e| (*pr, e)))
    }
}

/// What one cycle changed for a single pull request
#[derive(Debug, Clone, PartialEq)]
pub struct CycleUpdate {
    pub pr: u64,
    pub events: Vec<Event>,
    /// Became complete in this cycle
    pub completed: bool,
}

pub struct Coordinator<F> {
    fetcher: F,
    stop_condition: Option<StopCondition>,
    states: Vec<WatchState>,
}

impl<F: SnapshotFetcher> Coordinator<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            stop_condition: None,
            states: Vec::new(),
        }
    }

    /// Complete pull requests on this condition instead of quiescence
    pub fn with_stop_condition(mut self, condition: Option<StopCondition>) -> Self {
        self.stop_condition = condition;
        self
    }

    /// Start fresh state for each pull request; duplicates are watched once
    pub fn initialize(&mut self, prs: &[u64]) {
        self.states.clear();
        for &pr in prs {
            if self.state(pr).is_none() {
                self.states.push(WatchState::new(pr));
            }
        }
    }

    pub fn states(&self) -> &[WatchState] {
        &self.states
    }

    pub fn state(&self, pr: u64) -> Option<&WatchState> {
        self.states.iter().find(|s| s.pr == pr)
    }

    /// Pull requests not yet complete, in watch order
    pub fn pending(&self) -> Vec<u64> {
        self.states
            .iter()
            .filter(|s| !s.complete)
            .map(|s| s.pr)
            .collect()
    }

    pub fn are_all_complete(&self) -> bool {
        self.states.iter().all(|s| s.complete)
    }

    /// Fetch each of `prs` in turn. A failure for one does not stop the
    /// others; only a cycle where every fetch failed is an error.
    pub async fn fetch_pending(&self, prs: &[u64]) -> Result<FetchCycle, CoordinatorError> {
        let mut cycle = FetchCycle::default();
        for &pr in prs {
            let result = self.fetcher.fetch(pr).await;
            if let Err(e) = &result {
                tracing::warn!(pr, error = %e, "fetch failed");
            }
            cycle.results.push((pr, result));
        }

        let all_failed = cycle.results.iter().all(|(_, r)| r.is_err());
        if all_failed && !cycle.results.is_empty() {
            if let Some((_, Err(last))) = cycle.results.pop() {
                return Err(CoordinatorError::AllFailed {
                    attempted: prs.len(),
                    last,
                });
            }
        }
        Ok(cycle)
    }

    /// Fold a cycle into the stored state and return what changed.
    ///
    /// Successful fetches always replace the stored snapshot, even when no
    /// events resulted. Failed ones only record `last_error`.
    pub fn apply(&mut self, cycle: FetchCycle) -> Vec<CycleUpdate> {
        let stop_condition = self.stop_condition;
        let mut updates = Vec::new();

        for (pr, result) in cycle.results {
            let Some(state) = self.states.iter_mut().find(|s| s.pr == pr) else {
                tracing::debug!(pr, "ignoring result for unwatched pull request");
                continue;
            };

            match result {
                Ok(snapshot) => {
                    let events = detect_changes(state.snapshot.as_ref(), &snapshot);
                    state.events.extend(events.iter().cloned());

                    let done = match stop_condition {
                        Some(condition) => should_stop(&snapshot, Some(condition)),
                        None => is_quiescent(&snapshot),
                    };
                    let completed = done && !state.complete;
                    if completed {
                        tracing::info!(pr, "pull request complete");
                        state.complete = true;
                    }

                    state.snapshot = Some(snapshot);
                    state.last_error = None;
                    updates.push(CycleUpdate {
                        pr,
                        events,
                        completed,
                    });
                }
                Err(e) => state.last_error = Some(e),
            }
        }

        updates
    }

    /// One full cycle over every pending pull request
    pub async fn fetch_all(&mut self) -> Result<Vec<CycleUpdate>, CoordinatorError> {
        let pending = self.pending();
        let cycle = self.fetch_pending(&pending).await?;
        Ok(self.apply(cycle))
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
