use async_trait::async_trait;

use crate::domain::{NewTopic, Topic};
use crate::error::Result;

#[async_trait]
pub trait TopicsRepository: Send + Sync {
    /// Inserts a visible topic. A duplicate name is `NewsError::Conflict`.
    async fn create(&self, topic: NewTopic) -> Result<Topic>;

    async fn list(&self) -> Result<Vec<Topic>>;

    async fn get(&self, id: i64) -> Result<Option<Topic>>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Topic>>;

    /// Flips `is_visible` and returns the updated topic.
    async fn toggle_visibility(&self, id: i64) -> Result<Topic>;

    /// Returns `NewsError::NotFound` when no row matched.
    async fn delete(&self, id: i64) -> Result<()>;
}
