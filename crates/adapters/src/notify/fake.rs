// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake notification adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Notification, NotifyAdapter, NotifyError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Fake notification adapter for testing
///
/// Records every notification, including ones it was told to fail.
#[derive(Clone, Default)]
pub struct FakeNotifyAdapter {
    calls: Arc<Mutex<Vec<Notification>>>,
    fail: Arc<AtomicBool>,
}

impl FakeNotifyAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// An adapter whose every delivery fails
    pub fn failing() -> Self {
        let adapter = Self::default();
        adapter.set_failing(true);
        adapter
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Get all recorded notifications
    pub fn calls(&self) -> Vec<Notification> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl NotifyAdapter for FakeNotifyAdapter {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification);
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotifyError::Failed("fake failure".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
