// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use async_trait::async_trait;
use chrono::Utc;
use pw_adapters::{FakeNotifyAdapter, NotifyError};
use pw_core::EventKind;
use yare::parameterized;

/// A sink that never finishes in time
struct SlowSink;

#[async_trait]
impl NotifyAdapter for SlowSink {
    async fn notify(&self, _notification: Notification) -> Result<(), NotifyError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(())
    }
}

fn event(severity: Severity, message: &str) -> Event {
    Event::new(EventKind::Check, severity, message, Utc::now())
}

#[parameterized(
    error = { Severity::Error, NotifyUrgency::Critical },
    warning = { Severity::Warning, NotifyUrgency::Important },
    success = { Severity::Success, NotifyUrgency::Important },
    info = { Severity::Info, NotifyUrgency::Normal },
)]
fn severity_maps_to_urgency(severity: Severity, expected: NotifyUrgency) {
    assert_eq!(urgency(severity), expected);
}

#[tokio::test]
async fn event_notifications_carry_pr_and_ticket() {
    let sink = FakeNotifyAdapter::new();
    let mut notifier = Notifier::new(sink.clone());
    notifier.set_ticket(4, "PROJ-4");

    notifier.event(4, &event(Severity::Error, "Check failed: e2e (failure)"));
    notifier.flush().await;

    let calls = sink.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].title, "PR #4");
    assert_eq!(calls[0].subtitle.as_deref(), Some("check"));
    assert_eq!(calls[0].message, "Check failed: e2e (failure)");
    assert_eq!(calls[0].urgency, NotifyUrgency::Critical);
    assert_eq!(calls[0].kind, NotificationKind::Event);
    assert_eq!(calls[0].pr, Some(4));
    assert_eq!(calls[0].ticket.as_deref(), Some("PROJ-4"));
}

#[tokio::test]
async fn summary_and_error_kinds() {
    let sink = FakeNotifyAdapter::new();
    let mut notifier = Notifier::new(sink.clone());

    notifier.summary(2, "Checks pass");
    notifier.error(None, "Fetch failed", "connection refused");
    notifier.flush().await;

    let mut kinds: Vec<NotificationKind> = sink.calls().iter().map(|n| n.kind).collect();
    kinds.sort_by_key(|k| *k as u8);
    assert_eq!(kinds, vec![NotificationKind::Summary, NotificationKind::Error]);

    let error = sink
        .calls()
        .into_iter()
        .find(|n| n.kind == NotificationKind::Error)
        .unwrap();
    assert_eq!(error.pr, None);
    assert_eq!(error.urgency, NotifyUrgency::Critical);
}

#[tokio::test]
async fn delivery_failures_are_swallowed() {
    let sink = FakeNotifyAdapter::failing();
    let mut notifier = Notifier::new(sink.clone());

    notifier.event(1, &event(Severity::Info, "Check started: build"));
    notifier.summary(1, "done");
    notifier.flush().await;

    assert_eq!(sink.calls().len(), 2);
}

#[tokio::test]
async fn flush_gives_up_on_slow_sinks() {
    let mut notifier = Notifier::new(SlowSink).with_flush_timeout(Duration::from_millis(20));

    notifier.event(1, &event(Severity::Info, "Check started: build"));
    let started = std::time::Instant::now();
    notifier.flush().await;

    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn flush_without_deliveries_returns_immediately() {
    let mut notifier = Notifier::new(FakeNotifyAdapter::new());
    notifier.flush().await;
}
