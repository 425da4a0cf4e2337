use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::types::ProblemId;

use super::properties::ID_PROPERTY;

/// Response from `POST /databases/{id}/query`.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<PageObject>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// A database row. Property values vary by type, so they stay opaque JSON.
#[derive(Debug, Deserialize)]
pub struct PageObject {
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, Value>,
}

impl PageObject {
    /// The `"ID"` number property, if present and numeric.
    pub fn problem_id(&self) -> Option<ProblemId> {
        let prop = self.properties.get(ID_PROPERTY)?;
        if prop.get("type").and_then(Value::as_str) != Some("number") {
            return None;
        }
        let number = prop.get("number")?;
        number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|n| n.is_finite() && *n >= 0.0)
                .map(|n| n.trunc() as ProblemId)
        })
    }
}

/// Response from `POST /pages`. Only the id is of interest.
#[derive(Debug, Deserialize)]
pub struct CreatedPage {
    pub id: String,
}
