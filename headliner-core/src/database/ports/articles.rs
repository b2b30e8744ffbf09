use async_trait::async_trait;

use crate::domain::{Article, NewArticle};
use crate::error::Result;

#[async_trait]
pub trait ArticlesRepository: Send + Sync {
    async fn create(&self, article: NewArticle) -> Result<Article>;

    /// Saved articles in insertion order.
    async fn list(&self) -> Result<Vec<Article>>;

    async fn get(&self, id: i64) -> Result<Option<Article>>;

    /// Returns `NewsError::NotFound` when no row matched.
    async fn delete(&self, id: i64) -> Result<()>;
}
