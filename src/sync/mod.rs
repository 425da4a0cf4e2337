//! The sync batch: index the Notion database, collect solved LeetCode
//! problems, then create whatever is missing.
//!
//! Stages run strictly one after another and only hand values to each other;
//! re-running the whole batch is the recovery path for any partial failure.

pub mod destination;
pub mod source;
pub mod writer;

use std::time::Duration;

use crate::config::Config;
use crate::connectivity::{ConnectivityGuard, TcpProbe};
use crate::error::SyncError;
use crate::leetcode::LeetCodeClient;
use crate::notion::NotionClient;

pub use self::destination::fetch_existing_records;
pub use self::source::fetch_solved_items;
pub use self::writer::sync;

/// Counters for one writer pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The source reader returned nothing; the writer never ran.
    NothingToSync,
    Synced(SyncReport),
}

#[derive(Debug)]
pub struct SyncService {
    notion: NotionClient,
    leetcode: LeetCodeClient,
    guard: ConnectivityGuard,
}

impl SyncService {
    pub fn new(notion: NotionClient, leetcode: LeetCodeClient, guard: ConnectivityGuard) -> Self {
        Self {
            notion,
            leetcode,
            guard,
        }
    }

    /// Wire real HTTP clients and the TCP probe from `config`.
    pub fn from_config(config: &Config) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let notion = NotionClient::new(
            Box::new(http.clone()),
            &config.notion_token,
            &config.notion_database_id,
        );
        let leetcode = LeetCodeClient::new(
            Box::new(http),
            &config.leetcode_session,
            &config.leetcode_csrf,
        );
        let guard = ConnectivityGuard::new(
            Box::new(TcpProbe::new(config.probe_address)),
            config.probe_timeout,
            config.backoff.clone(),
        );
        Ok(Self::new(notion, leetcode, guard))
    }

    pub async fn run(&self) -> SyncOutcome {
        let existing = fetch_existing_records(&self.notion, &self.guard).await;
        let solved = fetch_solved_items(&self.leetcode, &self.guard).await;

        if solved.is_empty() {
            return SyncOutcome::NothingToSync;
        }

        SyncOutcome::Synced(sync(&self.notion, &self.guard, existing, &solved).await)
    }
}

/// Render the end-of-run summary printed to stdout.
pub fn summary_lines(report: &SyncReport, elapsed: Duration) -> Vec<String> {
    let mut lines = vec![
        "✓ Sync complete!".to_string(),
        format!("  New problems added: {}", report.created),
        format!("  Existing (skipped): {}", report.skipped),
    ];
    if report.failed > 0 {
        lines.push(format!("  Failed:             {}", report.failed));
    }
    lines.push(format!("  Total solved:       {}", report.total));
    lines.push(format!("  Elapsed:            {:.1}s", elapsed.as_secs_f64()));
    lines
}
