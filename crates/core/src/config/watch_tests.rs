// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;

#[test]
fn defaults() {
    let config = WatchConfig::default();
    assert_eq!(config.interval, Duration::from_secs(30));
    assert_eq!(config.notify_filter, NotifyFilter::All);
    assert_eq!(config.stop_condition, None);
    assert_eq!(config.max_iterations, 200);
    assert_eq!(config.heartbeat_every, 10);
    assert_eq!(config.analyze_every, 5);
    assert!(!config.desktop);
    assert!(config.validate().is_ok());
}

#[test]
fn empty_file_is_all_defaults() {
    assert_eq!(WatchConfig::parse("").unwrap(), WatchConfig::default());
}

#[test]
fn parses_partial_toml() {
    let config = WatchConfig::parse(
        r#"
interval = "1m"
notify_filter = "reviews"
stop_condition = "checks-pass"
desktop = true

[retry]
max_retries = 5
base_delay = "500ms"
"#,
    )
    .unwrap();

    assert_eq!(config.interval, Duration::from_secs(60));
    assert_eq!(config.notify_filter, NotifyFilter::Reviews);
    assert_eq!(config.stop_condition, Some(StopCondition::ChecksPass));
    assert!(config.desktop);
    assert_eq!(config.retry.max_retries, 5);
    assert_eq!(config.retry.base_delay, Duration::from_millis(500));
    assert_eq!(config.retry.max_delay, Duration::from_secs(30));
    assert_eq!(config.max_iterations, 200);
}

#[test]
fn unknown_stop_condition_is_a_parse_error() {
    let err = WatchConfig::parse(r#"stop_condition = "green""#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_iterations = 7").unwrap();

    let config = WatchConfig::load(file.path()).unwrap();
    assert_eq!(config.max_iterations, 7);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = WatchConfig::load_or_default(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config, WatchConfig::default());

    let err = WatchConfig::load(&dir.path().join("config.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn sub_second_interval_is_rejected() {
    let config = WatchConfig {
        interval: Duration::from_millis(500),
        ..WatchConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("interval"), "{err}");
}

#[yare::parameterized(
    iterations = { WatchConfig { max_iterations: 0, ..WatchConfig::default() }, "max_iterations" },
    heartbeat = { WatchConfig { heartbeat_every: 0, ..WatchConfig::default() }, "heartbeat_every" },
    analyze = { WatchConfig { analyze_every: 0, ..WatchConfig::default() }, "analyze_every" },
)]
fn zero_counts_are_rejected(config: WatchConfig, field: &str) {
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains(field), "{err}");
}

#[test]
fn shrinking_backoff_is_rejected() {
    let mut config = WatchConfig::default();
    config.retry.backoff_multiplier = 0.5;
    assert!(config.validate().is_err());
}
