//! SQLite persistence for saved articles and topics.

pub mod context;
pub mod infrastructure;
pub mod ports;

pub use context::DatabaseContext;
pub use ports::{ArticlesRepository, TopicsRepository};
