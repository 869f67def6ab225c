// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{Notification, NotifyAdapter, NotifyError};
use async_trait::async_trait;

/// Delivers each notification to every sink, in order
///
/// A failing sink does not stop the others; failures are combined into one
/// error after all sinks have been tried.
#[derive(Default)]
pub struct FanoutNotifier {
    sinks: Vec<Box<dyn NotifyAdapter>>,
}

impl FanoutNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl NotifyAdapter) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl NotifyAdapter for FanoutNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        let mut failures = Vec::new();
        for sink in &self.sinks {
            if let Err(e) = sink.notify(notification.clone()).await {
                failures.push(e.to_string());
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(NotifyError::Fanout(failures.join("; ")))
        }
    }
}

#[cfg(test)]
#[path = "fanout_tests.rs"]
mod tests;
