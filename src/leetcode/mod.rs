//! LeetCode GraphQL client: offset/limit pagination over the problem set.
//!
//! Authentication piggybacks on a browser session: the `LEETCODE_SESSION`
//! and `csrftoken` cookies, plus the CSRF token echoed in `x-csrftoken`.

pub mod queries;
pub mod responses;

use crate::error::SyncError;
use crate::transport::JsonTransport;

pub use self::responses::{GraphQlResponse, Question, QuestionList};

pub const GRAPHQL_URL: &str = "https://leetcode.com/graphql";
pub const PAGE_LIMIT: u64 = 100;

const REFERER: &str = "https://leetcode.com";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

pub struct LeetCodeClient {
    transport: Box<dyn JsonTransport>,
    cookie: String,
    csrf_token: String,
    graphql_url: String,
}

impl std::fmt::Debug for LeetCodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeetCodeClient")
            .field("cookie", &"<redacted>")
            .field("csrf_token", &"<redacted>")
            .field("graphql_url", &self.graphql_url)
            .finish_non_exhaustive()
    }
}

impl LeetCodeClient {
    pub fn new(transport: Box<dyn JsonTransport>, session: &str, csrf_token: &str) -> Self {
        Self {
            transport,
            cookie: format!("LEETCODE_SESSION={}; csrftoken={}", session, csrf_token),
            csrf_token: csrf_token.to_string(),
            graphql_url: GRAPHQL_URL.to_string(),
        }
    }

    /// Fetch the `limit` questions starting at offset `skip`.
    pub async fn question_page(&self, skip: u64, limit: u64) -> Result<QuestionList, SyncError> {
        let body = queries::question_list_request(skip, limit);
        let headers = [
            ("Cookie", self.cookie.as_str()),
            ("x-csrftoken", self.csrf_token.as_str()),
            ("Referer", REFERER),
            ("User-Agent", DEFAULT_USER_AGENT),
        ];
        let response = self
            .transport
            .post_json(&self.graphql_url, &body, &headers)
            .await?;
        let envelope: GraphQlResponse = serde_json::from_value(response)?;
        envelope.into_question_list()
    }
}
