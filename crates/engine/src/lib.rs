// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Pull watch engine: polling loops over one or many pull requests

mod coordinator;
mod error;
mod multi;
mod notifier;
mod report;
mod watch;

pub use coordinator::{Coordinator, CycleUpdate, FetchCycle, WatchState};
pub use error::CoordinatorError;
pub use multi::MultiWatcher;
pub use notifier::{urgency, Notifier, DEFAULT_FLUSH_TIMEOUT};
pub use report::{EventSummary, ProgressFn, WatchOutcome, WatchReport};
pub use watch::{WatchDeps, Watcher};
