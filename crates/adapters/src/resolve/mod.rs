// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turning user input into pull request numbers

mod gh;
mod identifier;

pub use gh::GhResolver;
pub use identifier::{parse_identifier, Identifier};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeResolver;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("not a PR number, PR URL or ticket key: {0:?}")]
    Invalid(String),
    #[error("no pull request found for {0}")]
    NotFound(String),
    #[error("command failed: {0}")]
    CommandFailed(String),
    #[error("malformed response: {0}")]
    Parse(String),
}

/// A pull request number, plus the ticket it was found through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub number: u64,
    pub ticket: Option<String>,
}

impl Resolved {
    pub fn number(number: u64) -> Self {
        Self {
            number,
            ticket: None,
        }
    }

    pub fn from_ticket(number: u64, ticket: impl Into<String>) -> Self {
        Self {
            number,
            ticket: Some(ticket.into()),
        }
    }
}

#[async_trait]
pub trait Resolver: Send + Sync + 'static {
    async fn resolve(&self, input: &str) -> Result<Resolved, ResolveError>;

    /// Resolve every input or none: the first failure aborts the batch
    async fn resolve_multiple(&self, inputs: &[String]) -> Result<Vec<Resolved>, ResolveError> {
        let mut resolved = Vec::with_capacity(inputs.len());
        for input in inputs {
            resolved.push(self.resolve(input).await?);
        }
        Ok(resolved)
    }
}
