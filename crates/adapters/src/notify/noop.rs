// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op notify adapter for when notifications are disabled.

use super::{Notification, NotifyAdapter, NotifyError};
use async_trait::async_trait;

/// Notify adapter that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpNotifyAdapter;

impl NoOpNotifyAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotifyAdapter for NoOpNotifyAdapter {
    async fn notify(&self, _notification: Notification) -> Result<(), NotifyError> {
        Ok(())
    }
}
