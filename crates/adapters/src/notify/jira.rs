// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jira ticket comments for watch summaries and errors

use super::{Notification, NotificationKind, NotifyAdapter, NotifyError};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

pub const ENV_BASE_URL: &str = "JIRA_BASE_URL";
pub const ENV_EMAIL: &str = "JIRA_EMAIL";
pub const ENV_API_TOKEN: &str = "JIRA_API_TOKEN";

#[derive(Clone)]
pub struct JiraConfig {
    pub base_url: String,
    pub email: String,
    pub api_token: String,
}

impl std::fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraConfig")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl JiraConfig {
    /// Read credentials from the environment; `None` unless all are set
    pub fn from_env() -> Option<Self> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Some(Self {
            base_url: var(ENV_BASE_URL)?,
            email: var(ENV_EMAIL)?,
            api_token: var(ENV_API_TOKEN)?,
        })
    }

    fn comment_url(&self, ticket: &str) -> String {
        format!(
            "{}/rest/api/2/issue/{}/comment",
            self.base_url.trim_end_matches('/'),
            ticket
        )
    }

    fn auth_header(&self) -> String {
        let credentials = format!("{}:{}", self.email, self.api_token);
        format!("Basic {}", STANDARD.encode(credentials))
    }
}

/// Posts summary and error notifications as comments on the ticket the pull
/// request was resolved from. Everything else is skipped.
#[derive(Clone, Debug)]
pub struct JiraNotifier {
    config: JiraConfig,
}

impl JiraNotifier {
    pub fn new(config: JiraConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl NotifyAdapter for JiraNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        if notification.kind == NotificationKind::Event {
            return Ok(());
        }
        let Some(ticket) = notification.ticket.as_deref() else {
            return Ok(());
        };

        let url = self.config.comment_url(ticket);
        let auth = self.config.auth_header();
        let body = comment_body(&notification);
        tracing::debug!(ticket, "posting jira comment");

        tokio::task::spawn_blocking(move || {
            ureq::post(&url)
                .header("Authorization", &auth)
                .header("Content-Type", "application/json")
                .send(body.as_bytes())
                .map(|_| ())
                .map_err(|e| NotifyError::Jira(e.to_string()))
        })
        .await
        .map_err(|e| NotifyError::Failed(e.to_string()))?
    }
}

fn comment_body(notification: &Notification) -> String {
    let mut text = format!("*{}*", notification.title);
    if let Some(pr) = notification.pr {
        text.push_str(&format!(" (PR #{})", pr));
    }
    text.push('\n');
    text.push_str(&notification.message);
    serde_json::json!({ "body": text }).to_string()
}

#[cfg(test)]
#[path = "jira_tests.rs"]
mod tests;
