use async_trait::async_trait;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::database::ports::TopicsRepository;
use crate::domain::{NewTopic, Topic};
use crate::error::{NewsError, Result};

#[derive(Debug, Clone)]
pub struct SqliteTopicsRepository {
    pool: SqlitePool,
}

impl SqliteTopicsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> Result<Topic> {
        let read = |column: &str, e: sqlx::Error| {
            NewsError::Internal(format!("Failed to read topic {column}: {e}"))
        };

        Ok(Topic {
            id: row.try_get("id").map_err(|e| read("id", e))?,
            name: row.try_get("name").map_err(|e| read("name", e))?,
            keyword: row.try_get("keyword").map_err(|e| read("keyword", e))?,
            is_visible: row
                .try_get("is_visible")
                .map_err(|e| read("is_visible", e))?,
        })
    }
}

#[async_trait]
impl TopicsRepository for SqliteTopicsRepository {
    async fn create(&self, topic: NewTopic) -> Result<Topic> {
        let row = sqlx::query(
            r#"
            INSERT INTO topics (name, keyword, is_visible)
            VALUES (?1, ?2, 1)
            RETURNING id, name, keyword, is_visible
            "#,
        )
        .bind(&topic.name)
        .bind(&topic.keyword)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                NewsError::Conflict(format!(
                    "topic '{}' already exists",
                    topic.name
                ))
            }
            other => NewsError::Database(other),
        })?;

        Self::map_row(&row)
    }

    async fn list(&self) -> Result<Vec<Topic>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, keyword, is_visible
            FROM topics
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn get(&self, id: i64) -> Result<Option<Topic>> {
        let row = sqlx::query(
            "SELECT id, name, keyword, is_visible FROM topics WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Topic>> {
        let row = sqlx::query(
            "SELECT id, name, keyword, is_visible FROM topics WHERE name = ?1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn toggle_visibility(&self, id: i64) -> Result<Topic> {
        let row = sqlx::query(
            r#"
            UPDATE topics
            SET is_visible = NOT is_visible
            WHERE id = ?1
            RETURNING id, name, keyword, is_visible
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| NewsError::NotFound(format!("topic {id}")))?;

        Self::map_row(&row)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM topics WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(NewsError::NotFound(format!("topic {id}")));
        }
        Ok(())
    }
}
