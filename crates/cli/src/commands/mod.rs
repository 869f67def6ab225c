// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

pub mod status;
pub mod watch;

use pw_adapters::{GhFetcher, GhResolver, TracedFetcher};
use pw_core::SystemClock;

/// `gh`-backed fetcher with tracing, scoped to `repo` when given
pub(crate) fn fetcher(repo: Option<&str>) -> TracedFetcher<GhFetcher<SystemClock>> {
    let mut fetcher = GhFetcher::new(SystemClock);
    if let Some(repo) = repo {
        fetcher = fetcher.with_repo(repo);
    }
    TracedFetcher::new(fetcher)
}

pub(crate) fn resolver(repo: Option<&str>) -> GhResolver {
    let resolver = GhResolver::new();
    match repo {
        Some(repo) => resolver.with_repo(repo),
        None => resolver,
    }
}
