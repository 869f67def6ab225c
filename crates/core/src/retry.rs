// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retry with exponential backoff and health tracking
//!
//! The consecutive-failure counter lives on the executor, not on a single
//! call: it survives across calls and only a success resets it. Callers
//! watching many poll cycles read [`RetryExecutor::health`] to decide when
//! to give up on the session.

use crate::clock::{millis, Clock};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    #[serde(with = "humantime_serde")]
    pub base_delay: Duration,
    #[serde(with = "humantime_serde")]
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Delay before retrying after the 0-indexed `attempt` failed
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let scaled = self.base_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        if !scaled.is_finite() || scaled >= self.max_delay.as_secs_f64() {
            return self.max_delay;
        }
        Duration::from_secs_f64(scaled.max(0.0))
    }
}

/// Coarse connection health derived from consecutive failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Healthy,
    Degraded,
    Unhealthy,
}

impl Health {
    pub fn from_failures(consecutive_failures: u32) -> Self {
        match consecutive_failures {
            0 => Health::Healthy,
            1..=2 => Health::Degraded,
            _ => Health::Unhealthy,
        }
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Health::Healthy => write!(f, "healthy"),
            Health::Degraded => write!(f, "degraded"),
            Health::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// An operation failed on every allowed attempt
#[derive(Debug, Error)]
#[error("{label} failed after {attempts} attempts: {source}")]
pub struct RetryError<E> {
    pub label: String,
    pub attempts: u32,
    pub source: E,
}

/// Consecutive-failure counter shared by every call on one executor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryState {
    pub consecutive_failures: u32,
}

/// Runs fallible async operations with bounded retries
#[derive(Debug, Clone)]
pub struct RetryExecutor<C: Clock> {
    config: RetryConfig,
    state: RetryState,
    clock: C,
}

impl<C: Clock> RetryExecutor<C> {
    pub fn new(config: RetryConfig, clock: C) -> Self {
        Self {
            config,
            state: RetryState::default(),
            clock,
        }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    pub fn state(&self) -> RetryState {
        self.state
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.state.consecutive_failures
    }

    pub fn health(&self) -> Health {
        Health::from_failures(self.state.consecutive_failures)
    }

    /// Run `op` up to `max_retries + 1` times.
    ///
    /// Every failed attempt bumps the failure counter; a success resets it.
    pub async fn execute<T, E, F, Fut>(&mut self, label: &str, mut op: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let max_attempts = self.config.max_retries.saturating_add(1);
        let mut attempt = 0;

        loop {
            match op().await {
                Ok(value) => {
                    if self.state.consecutive_failures > 0 {
                        tracing::info!(
                            label,
                            attempt = attempt + 1,
                            "recovered after failures"
                        );
                    }
                    self.state.consecutive_failures = 0;
                    return Ok(value);
                }
                Err(e) => {
                    self.state.consecutive_failures = self.state.consecutive_failures.saturating_add(1);

                    if attempt + 1 >= max_attempts {
                        tracing::warn!(
                            label,
                            attempts = max_attempts,
                            failures = self.state.consecutive_failures,
                            health = %self.health(),
                            error = %e,
                            "giving up"
                        );
                        return Err(RetryError {
                            label: label.to_string(),
                            attempts: max_attempts,
                            source: e,
                        });
                    }

                    let delay = self.config.delay_for(attempt);
                    tracing::debug!(
                        label,
                        attempt = attempt + 1,
                        delay_ms = millis(delay),
                        error = %e,
                        "attempt failed, backing off"
                    );
                    self.clock.sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
