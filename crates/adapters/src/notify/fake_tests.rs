// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn fake_notify_records_calls() {
    let adapter = FakeNotifyAdapter::new();

    adapter
        .notify(Notification::new("PR #1", "Check started: build"))
        .await
        .unwrap();
    adapter
        .notify(Notification::new("PR #1", "Check passed: build (success)"))
        .await
        .unwrap();

    let calls = adapter.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].title, "PR #1");
    assert_eq!(calls[1].message, "Check passed: build (success)");
}

#[tokio::test]
async fn failing_adapter_still_records() {
    let adapter = FakeNotifyAdapter::failing();

    assert!(adapter.notify(Notification::new("T", "M")).await.is_err());
    assert_eq!(adapter.calls().len(), 1);

    adapter.set_failing(false);
    assert!(adapter.notify(Notification::new("T", "M")).await.is_ok());
}
