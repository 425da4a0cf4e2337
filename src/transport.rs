use serde_json::Value;

use crate::error::SyncError;

/// Thin JSON-over-HTTP abstraction shared by the Notion and LeetCode clients.
#[async_trait::async_trait]
pub trait JsonTransport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        headers: &[(&str, &str)],
    ) -> Result<Value, SyncError>;
}

/// Response bodies longer than this are truncated in error messages.
const MAX_ERROR_BODY: usize = 512;

#[async_trait::async_trait]
impl JsonTransport for reqwest::Client {
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        headers: &[(&str, &str)],
    ) -> Result<Value, SyncError> {
        let mut builder = self.post(url).json(body);
        for &(k, v) in headers {
            builder = builder.header(k, v);
        }
        tracing::debug!("POST {}", url);
        let resp = builder.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let mut body = resp.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(SyncError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }
        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}
