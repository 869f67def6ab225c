// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: the `gh` CLI, desktop notifications and Jira

pub mod fetch;
pub mod notify;
pub mod resolve;
pub mod traced;

pub use fetch::{parse_pr_view, FetchError, GhFetcher, ParseError, SnapshotFetcher};
pub use notify::{
    DesktopNotifier, FanoutNotifier, JiraConfig, JiraNotifier, NoOpNotifyAdapter, Notification,
    NotificationKind, NotifyAdapter, NotifyError, NotifyUrgency,
};
pub use resolve::{parse_identifier, GhResolver, Identifier, ResolveError, Resolved, Resolver};
pub use traced::TracedFetcher;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use fetch::FakeFetcher;
#[cfg(any(test, feature = "test-support"))]
pub use notify::FakeNotifyAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use resolve::FakeResolver;
