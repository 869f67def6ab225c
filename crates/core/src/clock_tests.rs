// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_returns_increasing_time() {
    let clock = SystemClock;
    let t1 = clock.now();
    std::thread::sleep(Duration::from_millis(2));
    let t2 = clock.now();
    assert!(t2 > t1);
}

#[test]
fn fake_clock_can_be_advanced() {
    let clock = FakeClock::new();
    let t1 = clock.now();
    clock.advance(Duration::from_secs(60));
    let t2 = clock.now();
    assert_eq!((t2 - t1).num_seconds(), 60);
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::new();
    let clock2 = clock1.clone();
    let t1 = clock1.now();
    clock2.advance(Duration::from_secs(30));
    let t2 = clock1.now();
    assert_eq!((t2 - t1).num_seconds(), 30);
}

#[tokio::test]
async fn fake_sleep_advances_and_records() {
    let clock = FakeClock::new();
    let t1 = clock.now();

    clock.sleep(Duration::from_millis(1500)).await;
    clock.sleep(Duration::from_secs(3)).await;

    assert_eq!(
        clock.sleeps(),
        vec![Duration::from_millis(1500), Duration::from_secs(3)]
    );
    assert_eq!((clock.now() - t1).num_milliseconds(), 4500);
}

#[test]
fn fake_clock_set_overrides_time() {
    let clock = FakeClock::new();
    let target = DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
        .unwrap()
        .with_timezone(&Utc);
    clock.set(target);
    assert_eq!(clock.now(), target);
}

#[tokio::test]
async fn huge_sleep_saturates_instead_of_overflowing() {
    let clock = FakeClock::new();

    clock.sleep(Duration::MAX).await;
    assert_eq!(clock.now(), DateTime::<Utc>::MAX_UTC);

    clock.advance(Duration::from_secs(60));
    assert_eq!(clock.now(), DateTime::<Utc>::MAX_UTC);
    assert_eq!(clock.sleeps(), vec![Duration::MAX]);
}

#[test]
fn millis_saturates_for_huge_durations() {
    assert_eq!(millis(Duration::from_millis(1500)), 1500);
    assert_eq!(millis(Duration::MAX), u64::MAX);
}
