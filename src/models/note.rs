use serde::{Deserialize, Serialize};

/// A link attached to a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: Option<i64>,
    pub url: String,
    pub note: String,
}

/// Study note with its linked resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    pub resources: Vec<Resource>,
    pub created_ts: i64,
    pub modified_ts: i64,
}

impl Note {
    pub fn new(title: String, content: String) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            id: None,
            title,
            content,
            resources: Vec::new(),
            created_ts: now,
            modified_ts: now,
        }
    }
}
