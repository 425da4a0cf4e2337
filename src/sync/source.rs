use crate::connectivity::ConnectivityGuard;
use crate::leetcode::{LeetCodeClient, Question, PAGE_LIMIT};

/// Collect every accepted question from the LeetCode problem set.
///
/// Stops once the declared total is reached. Without connectivity the list is
/// empty; a failed request ends pagination and keeps what was collected.
pub async fn fetch_solved_items(
    leetcode: &LeetCodeClient,
    guard: &ConnectivityGuard,
) -> Vec<Question> {
    let mut solved: Vec<Question> = Vec::new();

    tracing::info!("Fetching solved problems from LeetCode...");
    if !guard.wait_for_connectivity().await {
        tracing::warn!("LeetCode unreachable, no solved problems fetched");
        return solved;
    }

    let mut skip = 0u64;
    loop {
        let page = match guard
            .retry_on_disconnect(move || leetcode.question_page(skip, PAGE_LIMIT))
            .await
        {
            Ok(p) => p,
            Err(e) => {
                tracing::error!("Error fetching problems at offset {}: {}", skip, e);
                break;
            }
        };

        let fetched = page.questions.len() as u64;
        solved.extend(page.questions.into_iter().filter(Question::is_accepted));
        tracing::info!(
            "Fetched {}/{} problems... {} solved",
            skip + fetched,
            page.total,
            solved.len()
        );

        if fetched == 0 || skip + fetched >= page.total {
            break;
        }
        skip += PAGE_LIMIT;
    }

    tracing::info!("✓ Total solved: {}", solved.len());
    solved
}
