// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Desktop notifications: `osascript` on macOS, `notify-send` elsewhere

use super::{Notification, NotifyAdapter, NotifyError, NotifyUrgency};
use async_trait::async_trait;
use tokio::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    Osascript,
    NotifySend,
}

impl Backend {
    fn current() -> Self {
        if cfg!(target_os = "macos") {
            Backend::Osascript
        } else {
            Backend::NotifySend
        }
    }
}

#[derive(Clone, Debug)]
pub struct DesktopNotifier {
    backend: Backend,
    app_name: String,
}

impl DesktopNotifier {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            backend: Backend::current(),
            app_name: app_name.into(),
        }
    }

    fn command(&self, notification: &Notification) -> (&'static str, Vec<String>) {
        match self.backend {
            Backend::Osascript => (
                "osascript",
                vec!["-e".to_string(), build_script(notification)],
            ),
            Backend::NotifySend => ("notify-send", self.notify_send_args(notification)),
        }
    }

    fn notify_send_args(&self, notification: &Notification) -> Vec<String> {
        let urgency = match notification.urgency {
            NotifyUrgency::Normal => "low",
            NotifyUrgency::Important => "normal",
            NotifyUrgency::Critical => "critical",
        };
        let body = match &notification.subtitle {
            Some(subtitle) => format!("{}\n{}", subtitle, notification.message),
            None => notification.message.clone(),
        };
        vec![
            format!("--app-name={}", self.app_name),
            format!("--urgency={}", urgency),
            notification.title.clone(),
            body,
        ]
    }
}

#[async_trait]
impl NotifyAdapter for DesktopNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        let (program, args) = self.command(&notification);

        let output = Command::new(program)
            .args(&args)
            .output()
            .await
            .map_err(|e| NotifyError::Failed(format!("{}: {}", program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(match self.backend {
                Backend::Osascript => NotifyError::Osascript(stderr),
                Backend::NotifySend => NotifyError::Failed(stderr),
            });
        }

        Ok(())
    }
}

fn build_script(notification: &Notification) -> String {
    let mut script = format!(
        r#"display notification "{}" with title "{}""#,
        escape_applescript(&notification.message),
        escape_applescript(&notification.title),
    );

    if let Some(subtitle) = &notification.subtitle {
        script.push_str(&format!(r#" subtitle "{}""#, escape_applescript(subtitle)));
    }

    match notification.urgency {
        NotifyUrgency::Normal => {}
        NotifyUrgency::Important => script.push_str(r#" sound name "default""#),
        NotifyUrgency::Critical => script.push_str(r#" sound name "Sosumi""#),
    }

    script
}

/// Escape special characters for AppleScript strings
fn escape_applescript(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
#[path = "desktop_tests.rs"]
mod tests;
