// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pw status`

use crate::error::PwError;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use pw_adapters::{Resolver, SnapshotFetcher};
use pw_core::{Insight, Snapshot, TrendAnalyzer};
use serde::Serialize;
use std::fmt;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// PR number, pull request URL or ticket key
    #[arg(value_name = "PR")]
    pub target: String,

    /// Repository to look in instead of the current clone
    #[arg(long, value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    /// Print the snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn status(args: StatusArgs) -> Result<()> {
    let repo = args.repo.as_deref();
    let resolved = super::resolver(repo)
        .resolve(&args.target)
        .await
        .map_err(|e| PwError::resolve(&args.target, e))?;

    let snapshot = super::fetcher(repo)
        .fetch(resolved.number)
        .await
        .map_err(|e| PwError::fetch(resolved.number, e))?;

    let view = StatusView::new(snapshot);
    let rendered = output::render(&view, OutputFormat::from_json_flag(args.json))?;
    println!("{}", rendered);
    Ok(())
}

/// One snapshot plus what a fresh analyzer makes of it
#[derive(Debug, Serialize)]
struct StatusView {
    snapshot: Snapshot,
    insights: Vec<String>,
}

impl StatusView {
    fn new(snapshot: Snapshot) -> Self {
        let insights = TrendAnalyzer::new()
            .analyze(&snapshot)
            .iter()
            .map(Insight::to_string)
            .collect();
        Self { snapshot, insights }
    }
}

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PR #{}: {}", self.snapshot.number, self.snapshot.title)?;
        write!(f, "{}", self.snapshot.summary_line())?;
        for insight in &self.insights {
            write!(f, "\n  {}", insight)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
