//! pw-core: Core library for the pull watch (pw) CLI tool
//!
//! This crate provides:
//! - The pull request snapshot model and change detection between polls
//! - Stop conditions and quiescence
//! - Retry with backoff and health tracking
//! - Duration trends and advisory insights
//! - Watch configuration

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod analyzer;
pub mod clock;
pub mod config;
pub mod diff;
pub mod event;
pub mod retry;
pub mod snapshot;
pub mod stop;

// Re-exports
pub use analyzer::{Insight, InsightLevel, TrendAnalyzer};
pub use clock::{millis, Clock, FakeClock, SystemClock};
pub use config::{ConfigError, NotifyFilter, WatchConfig};
pub use diff::detect_changes;
pub use event::{Event, EventDetail, EventKind, Severity};
pub use retry::{Health, RetryConfig, RetryError, RetryExecutor};
pub use snapshot::{
    CheckConclusion, CheckCounts, CheckRun, CheckStatus, Comment, Mergeable, PrState, Review,
    ReviewState, Snapshot,
};
pub use stop::{is_quiescent, should_stop, StopCondition};
