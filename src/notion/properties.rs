use serde_json::{json, Value};

use crate::types::ProblemRecord;

pub const TITLE_PROPERTY: &str = "Problem name";
pub const LEVEL_PROPERTY: &str = "Level";
pub const TOPICS_PROPERTY: &str = "Topics";
pub const ID_PROPERTY: &str = "ID";
pub const LINK_PROPERTY: &str = "Link";

/// Build the `properties` object of a new database page.
pub fn page_properties(record: &ProblemRecord) -> Value {
    let topics: Vec<Value> = record
        .topics
        .iter()
        .map(|name| json!({ "name": name }))
        .collect();

    json!({
        TITLE_PROPERTY: {
            "title": [{ "text": { "content": &record.title } }]
        },
        LEVEL_PROPERTY: {
            "select": { "name": &record.level }
        },
        TOPICS_PROPERTY: {
            "multi_select": topics
        },
        ID_PROPERTY: {
            "number": record.id
        },
        LINK_PROPERTY: {
            "url": &record.link
        },
    })
}
