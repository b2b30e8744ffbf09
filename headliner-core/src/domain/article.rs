use serde::{Deserialize, Serialize};

/// A saved favorite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub image_url: Option<String>,
    pub topic: String,
}

/// Insert payload for [`Article`]; doubles as the save-article form body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub topic: String,
}

impl NewArticle {
    /// Blank image URLs are stored as absent.
    pub fn normalized(mut self) -> Self {
        self.image_url = self.image_url.filter(|url| !url.trim().is_empty());
        self
    }
}

/// An entry parsed out of a feed, not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: Option<String>,
    pub topic: String,
}
