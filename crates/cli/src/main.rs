// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! pw - pull watch CLI

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod completions;
mod error;
mod output;

use clap::{Parser, Subcommand};
use commands::{status, watch};
use completions::CompletionsArgs;
use error::PwError;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pw",
    version,
    about = "pw - Watch pull requests until checks and reviews settle"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch one or more pull requests
    Watch(watch::WatchArgs),
    /// Show the current state of a pull request
    Status(status::StatusArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Watch(args) => watch::watch(args).await,
        Commands::Status(args) => status::status(args).await,
        Commands::Completions(args) => {
            completions::generate_completions::<Cli>(args.shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<PwError>() {
                Some(err) => eprint!("{}", err),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so stdout stays clean for reports and JSON.
/// `RUST_LOG` wins over the verbosity flags.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
