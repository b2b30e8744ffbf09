use serde::{Deserialize, Serialize};

/// A named feed category. Only visible topics contribute to the main view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    pub id: i64,
    pub name: String,
    pub keyword: String,
    pub is_visible: bool,
}

/// Insert payload for [`Topic`]; doubles as the add-topic form body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewTopic {
    pub name: String,
    pub keyword: String,
}

impl NewTopic {
    pub fn new(name: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keyword: keyword.into(),
        }
    }

    /// Both fields must be non-empty after trimming.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.keyword.trim().is_empty()
    }
}
