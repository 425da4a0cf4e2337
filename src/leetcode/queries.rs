use serde_json::{json, Value};

/// GraphQL query for one page of the problem set, including the viewer's
/// per-question status.
pub const QUESTION_LIST_QUERY: &str = r#"
query problemsetQuestionList($categorySlug: String, $limit: Int, $skip: Int, $filters: QuestionListFilterInput) {
    problemsetQuestionList: questionList(
        categorySlug: $categorySlug
        limit: $limit
        skip: $skip
        filters: $filters
    ) {
        total: totalNum
        questions: data {
            difficulty
            frontendQuestionId: questionFrontendId
            status
            title
            titleSlug
            topicTags {
                name
            }
        }
    }
}
"#;

/// Build the request document for the page starting at `skip`.
pub fn question_list_request(skip: u64, limit: u64) -> Value {
    json!({
        "query": QUESTION_LIST_QUERY,
        "variables": {
            "categorySlug": "",
            "skip": skip,
            "limit": limit,
            "filters": {},
        }
    })
}
