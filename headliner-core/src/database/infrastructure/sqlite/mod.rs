pub mod repositories;

pub use repositories::{SqliteArticlesRepository, SqliteTopicsRepository};
