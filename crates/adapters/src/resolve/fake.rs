// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake resolver for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{parse_identifier, Identifier, ResolveError, Resolved, Resolver};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Resolves numbers directly and ticket keys from a fixed table
#[derive(Clone, Debug, Default)]
pub struct FakeResolver {
    tickets: Arc<Mutex<HashMap<String, u64>>>,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ticket(self, key: impl Into<String>, number: u64) -> Self {
        self.tickets
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.into(), number);
        self
    }
}

#[async_trait]
impl Resolver for FakeResolver {
    async fn resolve(&self, input: &str) -> Result<Resolved, ResolveError> {
        match parse_identifier(input)? {
            Identifier::Number(number) => Ok(Resolved::number(number)),
            Identifier::TicketKey(key) => {
                let number = self
                    .tickets
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .get(&key)
                    .copied()
                    .ok_or_else(|| ResolveError::NotFound(key.clone()))?;
                Ok(Resolved::from_ticket(number, key))
            }
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
