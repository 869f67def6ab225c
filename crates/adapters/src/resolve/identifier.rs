// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::ResolveError;
use regex::Regex;
use std::sync::LazyLock;

// Allow expect here as the regexes are compile-time verified to be valid
#[allow(clippy::expect_used)]
static PR_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://\S+/pull/(\d+)(?:[/?#]\S*)?$").expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static TICKET_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][A-Z0-9]+-[0-9]+$").expect("constant regex pattern is valid")
});

/// What the user typed, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Number(u64),
    TicketKey(String),
}

/// Accepts `123`, `#123`, a pull request URL, or a ticket key like `PROJ-42`
pub fn parse_identifier(input: &str) -> Result<Identifier, ResolveError> {
    let trimmed = input.trim();
    let invalid = || ResolveError::Invalid(input.to_string());

    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return positive(digits).ok_or_else(invalid);
    }

    if let Some(caps) = PR_URL.captures(trimmed) {
        return caps
            .get(1)
            .and_then(|m| positive(m.as_str()))
            .ok_or_else(invalid);
    }

    if TICKET_KEY.is_match(trimmed) {
        return Ok(Identifier::TicketKey(trimmed.to_string()));
    }

    Err(invalid())
}

fn positive(digits: &str) -> Option<Identifier> {
    digits
        .parse::<u64>()
        .ok()
        .filter(|n| *n > 0)
        .map(Identifier::Number)
}

#[cfg(test)]
#[path = "identifier_tests.rs"]
mod tests;
