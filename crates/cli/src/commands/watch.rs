// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pw watch`

use crate::error::PwError;
use anyhow::Result;
use clap::Args;
use pw_adapters::{
    DesktopNotifier, FanoutNotifier, JiraConfig, JiraNotifier, Resolved, Resolver,
};
use pw_core::{Clock, NotifyFilter, StopCondition, SystemClock, WatchConfig};
use pw_engine::{MultiWatcher, ProgressFn, WatchDeps, WatchReport, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// PR numbers, pull request URLs or ticket keys
    #[arg(required = true, value_name = "PR")]
    pub targets: Vec<String>,

    /// Seconds between polls (at least 1)
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Which events to report: all, checks, reviews, comments
    #[arg(long, value_name = "FILTER")]
    pub notify: Option<NotifyFilter>,

    /// Stop once this holds: checks-pass, approved, merged, closed
    #[arg(long, value_name = "CONDITION")]
    pub until: Option<StopCondition>,

    /// Give up after this many polls
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<u32>,

    /// Print a heartbeat every N quiet polls
    #[arg(long, value_name = "N")]
    pub heartbeat_every: Option<u32>,

    /// Print insights every N polls
    #[arg(long, value_name = "N")]
    pub analyze_every: Option<u32>,

    /// Repository to look in instead of the current clone
    #[arg(long, value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    /// Also raise desktop notifications
    #[arg(long)]
    pub desktop: bool,

    /// Config file (defaults to <config dir>/pw/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

pub async fn watch(args: WatchArgs) -> Result<()> {
    let config = settings(&args)?;
    tracing::debug!(?config, "watch settings");

    let resolver = super::resolver(args.repo.as_deref());
    let report = match resolver.resolve_multiple(&args.targets).await {
        Ok(resolved) => run(resolved, config, args.repo.as_deref()).await,
        Err(e) => {
            let report = WatchReport::resolution_failed(SystemClock.now(), e);
            for line in report.lines() {
                println!("{}", line);
            }
            report
        }
    };

    println!("{}", report.footer());
    Ok(())
}

async fn run(resolved: Vec<Resolved>, config: WatchConfig, repo: Option<&str>) -> WatchReport {
    let deps = WatchDeps {
        fetcher: super::fetcher(repo),
        notify: sinks(&config),
        clock: SystemClock,
    };
    let progress: ProgressFn = Box::new(|line: &str| println!("{}", line));

    match resolved.as_slice() {
        [single] => {
            Watcher::new(deps, config)
                .with_progress(progress)
                .with_ticket(single.number, single.ticket.clone())
                .run(single.number)
                .await
        }
        _ => {
            let prs: Vec<u64> = resolved.iter().map(|r| r.number).collect();
            let tickets = resolved
                .iter()
                .filter_map(|r| r.ticket.clone().map(|t| (r.number, t)));
            MultiWatcher::new(deps, config)
                .with_progress(progress)
                .with_tickets(tickets)
                .run(&prs)
                .await
        }
    }
}

fn sinks(config: &WatchConfig) -> FanoutNotifier {
    let mut fanout = FanoutNotifier::new();
    if config.desktop {
        fanout = fanout.with(DesktopNotifier::new("pw"));
    }
    if let Some(jira) = JiraConfig::from_env() {
        tracing::info!(base_url = %jira.base_url, "posting summaries to Jira");
        fanout = fanout.with(JiraNotifier::new(jira));
    }
    fanout
}

/// Config file, then flags, then validation
fn settings(args: &WatchArgs) -> Result<WatchConfig, PwError> {
    let config = match &args.config {
        Some(path) => WatchConfig::load(path).map_err(|e| PwError::config_file(path, e))?,
        None => match default_config_path() {
            Some(path) => {
                WatchConfig::load_or_default(&path).map_err(|e| PwError::config_file(&path, e))?
            }
            None => WatchConfig::default(),
        },
    };

    let config = apply_flags(config, args);
    config.validate().map_err(PwError::invalid_settings)?;
    Ok(config)
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| config_path_in(&dir))
}

fn config_path_in(config_dir: &Path) -> PathBuf {
    config_dir.join("pw").join("config.toml")
}

/// Flags override whatever the config file said
fn apply_flags(mut config: WatchConfig, args: &WatchArgs) -> WatchConfig {
    if let Some(secs) = args.interval {
        config.interval = Duration::from_secs(secs);
    }
    if let Some(filter) = args.notify {
        config.notify_filter = filter;
    }
    if let Some(condition) = args.until {
        config.stop_condition = Some(condition);
    }
    if let Some(n) = args.max_iterations {
        config.max_iterations = n;
    }
    if let Some(n) = args.heartbeat_every {
        config.heartbeat_every = n;
    }
    if let Some(n) = args.analyze_every {
        config.analyze_every = n;
    }
    if args.desktop {
        config.desktop = true;
    }
    config
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
