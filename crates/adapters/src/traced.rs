// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::fetch::{FetchError, SnapshotFetcher};
use async_trait::async_trait;
use pw_core::{millis, Snapshot};
use tracing::Instrument;

/// Wrapper that adds tracing to any SnapshotFetcher
#[derive(Clone)]
pub struct TracedFetcher<F> {
    inner: F,
}

impl<F> TracedFetcher<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<F: SnapshotFetcher> SnapshotFetcher for TracedFetcher<F> {
    async fn fetch(&self, pr: u64) -> Result<Snapshot, FetchError> {
        let span = tracing::info_span!("fetch", pr);

        async {
            tracing::debug!("fetching");

            let start = std::time::Instant::now();
            let result = self.inner.fetch(pr).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(snapshot) => tracing::info!(
                    elapsed_ms = millis(elapsed),
                    state = %snapshot.state,
                    checks = snapshot.checks.len(),
                    reviews = snapshot.reviews.len(),
                    comments = snapshot.comments.len(),
                    "fetched"
                ),
                Err(e) => tracing::warn!(
                    elapsed_ms = millis(elapsed),
                    error = %e,
                    "fetch failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
