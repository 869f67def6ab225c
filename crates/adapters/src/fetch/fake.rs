// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake fetcher for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{FetchError, SnapshotFetcher};
use async_trait::async_trait;
use pw_core::Snapshot;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct FakeFetcherState {
    scripts: HashMap<u64, VecDeque<Result<Snapshot, FetchError>>>,
    last_success: HashMap<u64, Snapshot>,
    calls: Vec<u64>,
}

/// Fake fetcher replaying scripted results per pull request
///
/// Once a script runs out, the last successful snapshot for that pull
/// request is returned again, which reads as "nothing changed".
#[derive(Clone, Debug, Default)]
pub struct FakeFetcher {
    inner: Arc<Mutex<FakeFetcherState>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a snapshot for its pull request number
    pub fn push_snapshot(&self, snapshot: Snapshot) {
        self.push(snapshot.number, Ok(snapshot));
    }

    pub fn push_error(&self, pr: u64, error: FetchError) {
        self.push(pr, Err(error));
    }

    pub fn push(&self, pr: u64, result: Result<Snapshot, FetchError>) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.scripts.entry(pr).or_default().push_back(result);
    }

    /// Pull request numbers fetched, in call order
    pub fn calls(&self) -> Vec<u64> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }
}

#[async_trait]
impl SnapshotFetcher for FakeFetcher {
    async fn fetch(&self, pr: u64) -> Result<Snapshot, FetchError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.calls.push(pr);

        let next = inner.scripts.get_mut(&pr).and_then(VecDeque::pop_front);
        match next {
            Some(Ok(snapshot)) => {
                inner.last_success.insert(pr, snapshot.clone());
                Ok(snapshot)
            }
            Some(Err(e)) => Err(e),
            None => inner
                .last_success
                .get(&pr)
                .cloned()
                .ok_or(FetchError::NotFound(pr)),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
