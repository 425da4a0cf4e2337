use serde::Deserialize;
use serde_json::Value;

use crate::error::SyncError;
use crate::types::{ProblemId, ProblemRecord};

/// Status value LeetCode reports for an accepted submission.
pub const ACCEPTED_STATUS: &str = "ac";

const PROBLEM_URL_PREFIX: &str = "https://leetcode.com/problems/";

/// Top-level GraphQL envelope. `data` is null when the query failed.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<QuestionListData>,
    #[serde(default)]
    pub errors: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionListData {
    pub problemset_question_list: QuestionList,
}

#[derive(Debug, Deserialize)]
pub struct QuestionList {
    pub total: u64,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub difficulty: String,
    pub frontend_question_id: String,
    #[serde(default)]
    pub status: Option<String>,
    pub title: String,
    pub title_slug: String,
    #[serde(default)]
    pub topic_tags: Vec<TopicTag>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopicTag {
    pub name: String,
}

impl GraphQlResponse {
    pub fn into_question_list(self) -> Result<QuestionList, SyncError> {
        match self.data {
            Some(data) => Ok(data.problemset_question_list),
            None => {
                let detail = self
                    .errors
                    .map(|errs| Value::Array(errs).to_string())
                    .unwrap_or_else(|| "no data".to_string());
                Err(SyncError::Protocol(format!("GraphQL query failed: {}", detail)))
            }
        }
    }
}

impl Question {
    pub fn is_accepted(&self) -> bool {
        self.status.as_deref() == Some(ACCEPTED_STATUS)
    }

    pub fn problem_id(&self) -> Result<ProblemId, SyncError> {
        self.frontend_question_id
            .trim()
            .parse()
            .map_err(|_| SyncError::InvalidProblemId(self.frontend_question_id.clone()))
    }

    pub fn link(&self) -> String {
        format!("{}{}/", PROBLEM_URL_PREFIX, self.title_slug)
    }

    /// Convert into the record stored in the destination database.
    pub fn to_record(&self) -> Result<ProblemRecord, SyncError> {
        Ok(ProblemRecord {
            id: self.problem_id()?,
            title: self.title.clone(),
            level: self.difficulty.clone(),
            topics: self.topic_tags.iter().map(|t| t.name.clone()).collect(),
            link: self.link(),
        })
    }
}
