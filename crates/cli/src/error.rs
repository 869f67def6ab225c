// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! Each error says what went wrong, why it might have happened, and how
//! to fix it.

use pw_adapters::{FetchError, ResolveError};
use pw_core::ConfigError;
use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct PwError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl PwError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for PwError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for PwError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Builders for the failures the commands report
impl PwError {
    /// The config file exists but could not be read or parsed
    pub fn config_file(path: &Path, err: ConfigError) -> Self {
        PwError::new(format!("Failed to load config from {}", path.display()))
            .with_context(err.to_string())
            .with_suggestion("Fix the file, or point --config at another one")
            .with_suggestion("Durations are written as strings, e.g. interval = \"30s\"")
            .with_source(err)
    }

    /// Settings rejected after merging the config file and flags
    pub fn invalid_settings(err: ConfigError) -> Self {
        PwError::new("Invalid watch settings")
            .with_context(err.to_string())
            .with_suggestion("See the accepted ranges with: pw watch --help")
            .with_source(err)
    }

    pub fn resolve(input: &str, err: ResolveError) -> Self {
        PwError::new(format!("Could not resolve '{}'", input))
            .with_context(err.to_string())
            .with_suggestion("Pass a PR number, a pull request URL or a ticket key like PROJ-123")
            .with_source(err)
    }

    pub fn fetch(pr: u64, err: FetchError) -> Self {
        let mut error = PwError::new(format!("Failed to fetch PR #{}", pr))
            .with_context(err.to_string());
        error = match &err {
            FetchError::NotFound(_) => error
                .with_suggestion("Check the number, or pass --repo OWNER/NAME outside a clone"),
            _ => error.with_suggestion(
                "Check that the GitHub CLI is installed and authenticated: gh auth status",
            ),
        };
        error.with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PwError::new("Something went wrong")
            .with_context("First context")
            .with_context("Second context")
            .with_suggestion("Try this")
            .with_suggestion("Or this");

        let output = format!("{}", err);
        assert!(output.contains("error: Something went wrong"));
        assert!(output.contains("-> First context"));
        assert!(output.contains("-> Second context"));
        assert!(output.contains("1. Try this"));
        assert!(output.contains("2. Or this"));
    }

    #[test]
    fn test_invalid_settings_error() {
        let err = PwError::invalid_settings(ConfigError::Invalid(
            "interval must be at least 1s, got 0s".into(),
        ));
        let output = format!("{}", err);
        assert!(output.contains("Invalid watch settings"));
        assert!(output.contains("interval must be at least 1s"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_fetch_not_found_suggests_repo() {
        let err = PwError::fetch(7, FetchError::NotFound(7));
        let output = format!("{}", err);
        assert!(output.contains("Failed to fetch PR #7"));
        assert!(output.contains("--repo"));
    }

    #[test]
    fn test_fetch_failure_suggests_auth() {
        let err = PwError::fetch(7, FetchError::CommandFailed("HTTP 401".into()));
        assert!(format!("{}", err).contains("gh auth status"));
    }
}
