use std::collections::HashMap;

use crate::connectivity::ConnectivityGuard;
use crate::error::SyncError;
use crate::notion::NotionClient;
use crate::types::ProblemId;

/// Build the index of problems already present in the Notion database,
/// mapping each ProblemID to its page id.
///
/// Never fails: without connectivity the index is empty, and an error
/// mid-pagination returns the rows collected so far. Rows whose `"ID"`
/// property is missing or not a number are skipped.
pub async fn fetch_existing_records(
    notion: &NotionClient,
    guard: &ConnectivityGuard,
) -> HashMap<ProblemId, String> {
    let mut existing = HashMap::new();

    tracing::info!("Checking existing problems in Notion...");
    if !guard.wait_for_connectivity().await {
        tracing::warn!("Notion unreachable, treating every solved problem as new");
        return existing;
    }

    let mut cursor: Option<String> = None;
    let mut pages = 0usize;
    let mut dropped = 0usize;

    loop {
        let start_cursor = cursor.as_deref();
        let response = match guard
            .retry_on_disconnect(move || notion.query_database(start_cursor))
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    "Error querying Notion database (page {}): {}",
                    pages + 1,
                    e
                );
                break;
            }
        };
        pages += 1;

        for page in response.results {
            match page.problem_id() {
                Some(id) => {
                    existing.insert(id, page.id);
                }
                None => dropped += 1,
            }
        }

        if !response.has_more {
            break;
        }
        match response.next_cursor {
            Some(next) => cursor = Some(next),
            None => {
                let e = SyncError::Protocol("has_more set without next_cursor".to_string());
                tracing::error!("Error querying Notion database: {}", e);
                break;
            }
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, "Skipped Notion rows without a numeric ID property");
    }
    tracing::info!(pages, "✓ Found {} existing problems", existing.len());
    existing
}
