// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification sinks

mod desktop;
mod fanout;
mod jira;
mod noop;

pub use desktop::DesktopNotifier;
pub use fanout::FanoutNotifier;
pub use jira::{JiraConfig, JiraNotifier};
pub use noop::NoOpNotifyAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeNotifyAdapter;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification failed: {0}")]
    Failed(String),
    #[error("osascript error: {0}")]
    Osascript(String),
    #[error("jira request failed: {0}")]
    Jira(String),
    #[error("{0}")]
    Fanout(String),
}

/// Notification urgency level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyUrgency {
    /// Normal notification (no sound)
    Normal,
    /// Important notification (default sound)
    Important,
    /// Critical notification (alert sound, stays visible)
    Critical,
}

/// What produced a notification. Sinks use this to pick what they forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Event,
    Summary,
    Error,
}

/// A notification to deliver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub subtitle: Option<String>,
    pub message: String,
    pub urgency: NotifyUrgency,
    pub kind: NotificationKind,
    pub pr: Option<u64>,
    /// Ticket the pull request was resolved from
    pub ticket: Option<String>,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            message: message.into(),
            urgency: NotifyUrgency::Normal,
            kind: NotificationKind::Event,
            pr: None,
            ticket: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_urgency(mut self, urgency: NotifyUrgency) -> Self {
        self.urgency = urgency;
        self
    }

    pub fn with_kind(mut self, kind: NotificationKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn for_pr(mut self, pr: u64) -> Self {
        self.pr = Some(pr);
        self
    }

    pub fn with_ticket(mut self, ticket: Option<String>) -> Self {
        self.ticket = ticket;
        self
    }

    pub fn important(mut self) -> Self {
        self.urgency = NotifyUrgency::Important;
        self
    }

    pub fn critical(mut self) -> Self {
        self.urgency = NotifyUrgency::Critical;
        self
    }
}

/// Adapter trait for notification delivery
///
/// Object safe, so several sinks can sit behind one [`FanoutNotifier`].
#[async_trait]
pub trait NotifyAdapter: Send + Sync + 'static {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
