// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watch session configuration
//!
//! Loaded from an optional TOML file, then overridden by command-line flags
//! and validated once before a session starts.

use super::NotifyFilter;
use crate::retry::RetryConfig;
use crate::stop::StopCondition;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Shortest accepted poll interval
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("unknown {field}: {value}")]
    UnknownValue { field: &'static str, value: String },
}

/// Settings for one watch session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Time between polls
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    pub notify_filter: NotifyFilter,
    /// Stop on this predicate instead of quiescence
    pub stop_condition: Option<StopCondition>,
    pub max_iterations: u32,
    /// Emit a heartbeat line every N quiet iterations
    pub heartbeat_every: u32,
    /// Run trend analysis every N iterations
    pub analyze_every: u32,
    pub retry: RetryConfig,
    /// Also raise desktop notifications
    pub desktop: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            notify_filter: NotifyFilter::All,
            stop_condition: None,
            max_iterations: 200,
            heartbeat_every: 10,
            analyze_every: 5,
            retry: RetryConfig::default(),
            desktop: false,
        }
    }
}

impl WatchConfig {
    /// Load from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `path` if it exists, otherwise defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval < MIN_INTERVAL {
            return Err(ConfigError::Invalid(format!(
                "interval must be at least {}s, got {}",
                MIN_INTERVAL.as_secs(),
                humantime::format_duration(self.interval)
            )));
        }
        for (name, value) in [
            ("max_iterations", self.max_iterations),
            ("heartbeat_every", self.heartbeat_every),
            ("analyze_every", self.analyze_every),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be at least 1")));
            }
        }
        let retry = &self.retry;
        if !retry.backoff_multiplier.is_finite() || retry.backoff_multiplier < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "backoff_multiplier must be >= 1.0, got {}",
                retry.backoff_multiplier
            )));
        }
        if retry.base_delay > retry.max_delay {
            return Err(ConfigError::Invalid(
                "retry base_delay exceeds max_delay".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
