// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::fetch::FakeFetcher;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn new() -> Self {
        Self::default()
    }

    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a test with captured tracing output
fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::new();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.contents(), result)
}

#[test]
fn traced_fetch_logs_span_and_outcome() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeFetcher::new();
        fake.push_snapshot(Snapshot::new(31, "Add cache", Utc::now()));
        TracedFetcher::new(fake).fetch(31).await
    });

    assert!(result.is_ok(), "fetch should succeed: {:?}", result);
    assert!(logs.contains("fetch"), "Should log span name. Logs:\n{}", logs);
    assert!(logs.contains("pr=31"), "Should log pr. Logs:\n{}", logs);
    assert!(logs.contains("fetched"), "Should log completion. Logs:\n{}", logs);
    assert!(logs.contains("elapsed_ms"), "Should log timing. Logs:\n{}", logs);
}

#[test]
fn traced_fetch_logs_failure() {
    let (logs, result) = with_tracing(|| async {
        TracedFetcher::new(FakeFetcher::new()).fetch(8).await
    });

    assert_eq!(result.unwrap_err(), FetchError::NotFound(8));
    assert!(
        logs.contains("fetch failed"),
        "Should log failure. Logs:\n{}",
        logs
    );
    assert!(logs.contains("WARN"), "Should log at warn. Logs:\n{}", logs);
}

#[tokio::test]
async fn traced_fetch_delegates_to_inner() {
    let fake = FakeFetcher::new();
    fake.push_snapshot(Snapshot::new(3, "Docs", Utc::now()));
    let traced = TracedFetcher::new(fake.clone());

    let snapshot = traced.fetch(3).await.unwrap();

    assert_eq!(snapshot.title, "Docs");
    assert_eq!(fake.calls(), vec![3]);
}
