use std::collections::HashMap;

use crate::connectivity::ConnectivityGuard;
use crate::leetcode::Question;
use crate::notion::NotionClient;
use crate::types::ProblemId;

use super::SyncReport;

/// Create a Notion page for every solved question not yet in `existing`.
///
/// Create-only: a question whose ID is already indexed is skipped even if its
/// title, level or topics changed. A failed create is logged and counted, and
/// the loop moves on to the next question. A create is only resent when it
/// never reached Notion; after a timeout it counts as failed, and the next
/// run's index decides whether the page exists.
pub async fn sync(
    notion: &NotionClient,
    guard: &ConnectivityGuard,
    mut existing: HashMap<ProblemId, String>,
    items: &[Question],
) -> SyncReport {
    let mut report = SyncReport {
        total: items.len(),
        ..SyncReport::default()
    };

    tracing::info!("Starting sync of {} solved problems...", items.len());

    for question in items {
        let record = match question.to_record() {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("✗ Failed: {} - {}", question.title, e);
                report.failed += 1;
                continue;
            }
        };

        if existing.contains_key(&record.id) {
            tracing::debug!(id = record.id, "Already in Notion, skipping");
            report.skipped += 1;
            continue;
        }

        let record_ref = &record;
        match guard
            .retry_if_unsent(move || notion.create_page(record_ref))
            .await
        {
            Ok(page) => {
                tracing::info!("✓ Created: {}. {}", record.id, record.title);
                existing.insert(record.id, page.id);
                report.created += 1;
            }
            Err(e) => {
                tracing::error!("✗ Failed: {} - {}", record.title, e);
                report.failed += 1;
            }
        }
    }

    report
}
