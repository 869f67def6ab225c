// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! GitHub CLI fetcher

use super::{parse_pr_view, FetchError, SnapshotFetcher};
use async_trait::async_trait;
use pw_core::{Clock, Snapshot};
use tokio::process::Command;

/// Fields requested from `gh pr view`
pub const PR_VIEW_FIELDS: &str =
    "number,title,state,isDraft,mergeable,statusCheckRollup,reviews,comments,reviewRequests";

/// Fetches snapshots by shelling out to `gh pr view`
#[derive(Clone)]
pub struct GhFetcher<C> {
    repo: Option<String>,
    clock: C,
}

impl<C: Clock> GhFetcher<C> {
    pub fn new(clock: C) -> Self {
        Self { repo: None, clock }
    }

    /// Target `owner/name` instead of the repository in the working directory
    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    fn args(&self, pr: u64) -> Vec<String> {
        let mut args = vec![
            "pr".to_string(),
            "view".to_string(),
            pr.to_string(),
            "--json".to_string(),
            PR_VIEW_FIELDS.to_string(),
        ];
        if let Some(repo) = &self.repo {
            args.push("--repo".to_string());
            args.push(repo.clone());
        }
        args
    }
}

#[async_trait]
impl<C: Clock> SnapshotFetcher for GhFetcher<C> {
    async fn fetch(&self, pr: u64) -> Result<Snapshot, FetchError> {
        let output = Command::new("gh")
            .args(self.args(pr))
            .output()
            .await
            .map_err(|e| FetchError::Io(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if is_not_found(&stderr) {
                return Err(FetchError::NotFound(pr));
            }
            return Err(FetchError::CommandFailed(stderr.trim().to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_pr_view(&stdout, self.clock.now())?)
    }
}

fn is_not_found(stderr: &str) -> bool {
    stderr.contains("Could not resolve to a PullRequest")
        || stderr.contains("no pull requests found")
}

#[cfg(test)]
#[path = "gh_tests.rs"]
mod tests;
