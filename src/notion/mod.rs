//! Notion database client: cursor-paginated queries and page creation.

pub mod properties;
pub mod responses;

use serde_json::{json, Value};

use crate::error::SyncError;
use crate::transport::JsonTransport;
use crate::types::ProblemRecord;

pub use self::responses::{CreatedPage, QueryResponse};

pub const API_ROOT: &str = "https://api.notion.com/v1";
pub const NOTION_VERSION: &str = "2022-06-28";
pub const PAGE_SIZE: usize = 100;

pub struct NotionClient {
    transport: Box<dyn JsonTransport>,
    authorization: String,
    database_id: String,
    api_root: String,
}

impl std::fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionClient")
            .field("authorization", &"<redacted>")
            .field("database_id", &self.database_id)
            .field("api_root", &self.api_root)
            .finish_non_exhaustive()
    }
}

impl NotionClient {
    pub fn new(transport: Box<dyn JsonTransport>, token: &str, database_id: &str) -> Self {
        Self {
            transport,
            authorization: format!("Bearer {}", token),
            database_id: database_id.to_string(),
            api_root: API_ROOT.to_string(),
        }
    }

    fn headers(&self) -> [(&str, &str); 2] {
        [
            ("Authorization", self.authorization.as_str()),
            ("Notion-Version", NOTION_VERSION),
        ]
    }

    /// Fetch one page of database rows, starting at `start_cursor`.
    pub async fn query_database(
        &self,
        start_cursor: Option<&str>,
    ) -> Result<QueryResponse, SyncError> {
        let url = format!("{}/databases/{}/query", self.api_root, self.database_id);
        let mut body = json!({ "page_size": PAGE_SIZE });
        if let Some(cursor) = start_cursor {
            body["start_cursor"] = Value::String(cursor.to_string());
        }
        let response = self
            .transport
            .post_json(&url, &body, &self.headers())
            .await?;
        Ok(serde_json::from_value(response)?)
    }

    /// Create one database row for `record`.
    pub async fn create_page(&self, record: &ProblemRecord) -> Result<CreatedPage, SyncError> {
        let url = format!("{}/pages", self.api_root);
        let body = json!({
            "parent": { "database_id": &self.database_id },
            "properties": properties::page_properties(record),
        });
        let response = self
            .transport
            .post_json(&url, &body, &self.headers())
            .await?;
        Ok(serde_json::from_value(response)?)
    }
}
