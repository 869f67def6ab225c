// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration modules

mod notify;
mod watch;

pub use notify::NotifyFilter;
pub use watch::{ConfigError, WatchConfig};
