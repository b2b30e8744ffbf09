pub mod articles;
pub mod topics;

pub use articles::SqliteArticlesRepository;
pub use topics::SqliteTopicsRepository;
