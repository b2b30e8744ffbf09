use async_trait::async_trait;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::database::ports::ArticlesRepository;
use crate::domain::{Article, NewArticle};
use crate::error::{NewsError, Result};

#[derive(Debug, Clone)]
pub struct SqliteArticlesRepository {
    pool: SqlitePool,
}

impl SqliteArticlesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> Result<Article> {
        let read = |column: &str, e: sqlx::Error| {
            NewsError::Internal(format!("Failed to read article {column}: {e}"))
        };

        Ok(Article {
            id: row.try_get("id").map_err(|e| read("id", e))?,
            title: row.try_get("title").map_err(|e| read("title", e))?,
            description: row
                .try_get("description")
                .map_err(|e| read("description", e))?,
            url: row.try_get("url").map_err(|e| read("url", e))?,
            image_url: row
                .try_get("image_url")
                .map_err(|e| read("image_url", e))?,
            topic: row.try_get("topic").map_err(|e| read("topic", e))?,
        })
    }
}

#[async_trait]
impl ArticlesRepository for SqliteArticlesRepository {
    async fn create(&self, article: NewArticle) -> Result<Article> {
        let article = article.normalized();
        let row = sqlx::query(
            r#"
            INSERT INTO articles (title, description, url, image_url, topic)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, title, description, url, image_url, topic
            "#,
        )
        .bind(article.title)
        .bind(article.description)
        .bind(article.url)
        .bind(article.image_url)
        .bind(article.topic)
        .fetch_one(&self.pool)
        .await?;

        Self::map_row(&row)
    }

    async fn list(&self) -> Result<Vec<Article>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, url, image_url, topic
            FROM articles
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn get(&self, id: i64) -> Result<Option<Article>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, url, image_url, topic
            FROM articles
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(NewsError::NotFound(format!("article {id}")));
        }
        Ok(())
    }
}
