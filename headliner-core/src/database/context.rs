use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::MIGRATOR;
use crate::database::infrastructure::sqlite::{
    SqliteArticlesRepository, SqliteTopicsRepository,
};
use crate::database::ports::{ArticlesRepository, TopicsRepository};
use crate::error::Result;

/// Bundles the SQLite pool with the repositories built on it.
#[derive(Clone)]
pub struct DatabaseContext {
    pool: SqlitePool,
    articles: Arc<dyn ArticlesRepository>,
    topics: Arc<dyn TopicsRepository>,
}

impl fmt::Debug for DatabaseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseContext")
            .field("pool_size", &self.pool.size())
            .field("articles_ptr", &Arc::as_ptr(&self.articles))
            .field("topics_ptr", &Arc::as_ptr(&self.topics))
            .finish()
    }
}

impl DatabaseContext {
    /// Opens (creating if needed) the SQLite database at `url`.
    pub async fn connect_sqlite(
        url: &str,
        max_connections: u32,
    ) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;
        Ok(Self::from_pool(pool))
    }

    /// Single-connection in-memory database, used by tests and previews.
    pub async fn connect_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            articles: Arc::new(SqliteArticlesRepository::new(pool.clone())),
            topics: Arc::new(SqliteTopicsRepository::new(pool.clone())),
            pool,
        }
    }

    /// Applies the embedded migrations.
    pub async fn initialize_schema(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await?;
        info!("database schema up to date");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn articles(&self) -> Arc<dyn ArticlesRepository> {
        Arc::clone(&self.articles)
    }

    pub fn topics(&self) -> Arc<dyn TopicsRepository> {
        Arc::clone(&self.topics)
    }
}
