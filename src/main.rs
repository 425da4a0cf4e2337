//! leetcode-notion-sync: mirror solved LeetCode problems into a Notion database.
//!
//! One batch per invocation. The Notion database is indexed by problem ID,
//! the accepted problems are read from LeetCode's GraphQL problem set, and a
//! page is created for every problem not yet present. Existing pages are never
//! touched, so re-running after a partial failure is always safe.

#![warn(clippy::all)]

mod cli;
mod config;
mod connectivity;
mod error;
mod leetcode;
mod notion;
mod retry;
mod sync;
#[cfg(test)]
mod test_support;
mod transport;
mod types;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::Config;
use sync::{SyncOutcome, SyncService};

const RULE_WIDTH: usize = 60;

/// The `.env` failure worth reporting. A missing file is not one: the real
/// environment may carry everything.
fn dotenv_problem(result: dotenvy::Result<PathBuf>) -> Option<dotenvy::Error> {
    result.err().filter(|e| !e.not_found())
}

/// Build the service, or the line to print instead of running it.
fn prepare(cli: cli::Cli) -> Result<SyncService, String> {
    let config = Config::from_cli(cli).map_err(|e| format!("ERROR: {e}"))?;
    tracing::debug!(?config, "Loaded configuration");
    SyncService::from_config(&config).map_err(|e| format!("ERROR: {e}"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    let filter = cli.log_level.as_filter();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    if let Some(e) = dotenv_problem(dotenv) {
        tracing::warn!("Could not load .env: {}", e);
    }

    let rule = "=".repeat(RULE_WIDTH);
    println!("LeetCode → Notion Sync");
    println!("{rule}");

    let service = match prepare(cli) {
        Ok(s) => s,
        Err(message) => {
            println!("{message}");
            return Ok(());
        }
    };

    let started = Instant::now();
    match service.run().await {
        SyncOutcome::NothingToSync => {
            println!("No solved problems found!");
        }
        SyncOutcome::Synced(report) => {
            println!();
            println!("{rule}");
            for line in sync::summary_lines(&report, started.elapsed()) {
                println!("{line}");
            }
            println!("{rule}");
        }
    }

    Ok(())
}
