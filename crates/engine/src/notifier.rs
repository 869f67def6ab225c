// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Best-effort notification dispatch
//!
//! Deliveries run on background tasks so a slow or broken sink never holds
//! up a poll cycle. Failures are logged and dropped.

use pw_adapters::{Notification, NotificationKind, NotifyAdapter, NotifyUrgency};
use pw_core::{millis, Event, Severity};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

/// Upper bound on waiting for outstanding deliveries at session end
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Notifier<N> {
    sink: Arc<N>,
    tickets: HashMap<u64, String>,
    in_flight: JoinSet<()>,
    flush_timeout: Duration,
}

impl<N: NotifyAdapter> Notifier<N> {
    pub fn new(sink: N) -> Self {
        Self {
            sink: Arc::new(sink),
            tickets: HashMap::new(),
            in_flight: JoinSet::new(),
            flush_timeout: DEFAULT_FLUSH_TIMEOUT,
        }
    }

    pub fn with_flush_timeout(mut self, timeout: Duration) -> Self {
        self.flush_timeout = timeout;
        self
    }

    /// Attach the ticket a pull request was resolved from
    pub fn set_ticket(&mut self, pr: u64, ticket: impl Into<String>) {
        self.tickets.insert(pr, ticket.into());
    }

    pub fn event(&mut self, pr: u64, event: &Event) {
        let notification = Notification::new(format!("PR #{}", pr), event.message.clone())
            .with_subtitle(event.kind.to_string())
            .with_urgency(urgency(event.severity));
        self.dispatch(Some(pr), notification);
    }

    pub fn summary(&mut self, pr: u64, text: impl Into<String>) {
        let notification = Notification::new(format!("PR #{}", pr), text)
            .with_subtitle("Watch finished")
            .with_kind(NotificationKind::Summary)
            .important();
        self.dispatch(Some(pr), notification);
    }

    /// `pr` is `None` for failures that are not tied to one pull request
    pub fn error(
        &mut self,
        pr: Option<u64>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) {
        let notification = Notification::new(title, message)
            .with_kind(NotificationKind::Error)
            .critical();
        self.dispatch(pr, notification);
    }

    /// Wait for outstanding deliveries, abandoning them after the flush timeout
    pub async fn flush(&mut self) {
        let pending = self.in_flight.len();
        if pending == 0 {
            return;
        }

        let drained = tokio::time::timeout(self.flush_timeout, async {
            while self.in_flight.join_next().await.is_some() {}
        })
        .await;

        if drained.is_err() {
            tracing::warn!(
                pending = self.in_flight.len(),
                timeout_ms = millis(self.flush_timeout),
                "abandoning slow notifications"
            );
            self.in_flight.abort_all();
        }
    }

    fn dispatch(&mut self, pr: Option<u64>, mut notification: Notification) {
        if let Some(pr) = pr {
            notification = notification
                .for_pr(pr)
                .with_ticket(self.tickets.get(&pr).cloned());
        }

        // Reap finished deliveries so the set stays small on long watches
        while self.in_flight.try_join_next().is_some() {}

        let sink = Arc::clone(&self.sink);
        self.in_flight.spawn(async move {
            let title = notification.title.clone();
            if let Err(e) = sink.notify(notification).await {
                tracing::warn!(title, error = %e, "notification failed");
            }
        });
    }
}

/// Error is critical; warning and success are worth a sound
pub fn urgency(severity: Severity) -> NotifyUrgency {
    match severity {
        Severity::Error => NotifyUrgency::Critical,
        Severity::Warning | Severity::Success => NotifyUrgency::Important,
        Severity::Info => NotifyUrgency::Normal,
    }
}

#[cfg(test)]
#[path = "notifier_tests.rs"]
mod tests;
