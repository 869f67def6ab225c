// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ticket key lookup through `gh pr list`

use super::{parse_identifier, Identifier, ResolveError, Resolved, Resolver};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrListEntry {
    number: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    head_ref_name: String,
}

/// Resolves numbers directly and ticket keys by searching pull requests
#[derive(Clone, Debug, Default)]
pub struct GhResolver {
    repo: Option<String>,
}

impl GhResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    fn search_args(&self, key: &str) -> Vec<String> {
        let mut args: Vec<String> = ["pr", "list", "--state", "all", "--search", key]
            .iter()
            .map(|s| s.to_string())
            .collect();
        args.push("--json".to_string());
        args.push("number,title,headRefName".to_string());
        if let Some(repo) = &self.repo {
            args.push("--repo".to_string());
            args.push(repo.clone());
        }
        args
    }

    async fn search(&self, key: &str) -> Result<u64, ResolveError> {
        let output = Command::new("gh")
            .args(self.search_args(key))
            .output()
            .await
            .map_err(|e| ResolveError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ResolveError::CommandFailed(stderr.trim().to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let entries: Vec<PrListEntry> =
            serde_json::from_str(&stdout).map_err(|e| ResolveError::Parse(e.to_string()))?;

        pick_match(key, &entries).ok_or_else(|| ResolveError::NotFound(key.to_string()))
    }
}

#[async_trait]
impl Resolver for GhResolver {
    async fn resolve(&self, input: &str) -> Result<Resolved, ResolveError> {
        match parse_identifier(input)? {
            Identifier::Number(number) => Ok(Resolved::number(number)),
            Identifier::TicketKey(key) => {
                let number = self.search(&key).await?;
                tracing::debug!(key, number, "resolved ticket");
                Ok(Resolved::from_ticket(number, key))
            }
        }
    }
}

/// First entry mentioning `key` in its title or head branch.
///
/// Search results are fuzzy, so the key must appear literally.
fn pick_match(key: &str, entries: &[PrListEntry]) -> Option<u64> {
    let needle = key.to_lowercase();
    entries
        .iter()
        .find(|e| {
            e.title.to_lowercase().contains(&needle)
                || e.head_ref_name.to_lowercase().contains(&needle)
        })
        .map(|e| e.number)
}

#[cfg(test)]
#[path = "gh_tests.rs"]
mod tests;
