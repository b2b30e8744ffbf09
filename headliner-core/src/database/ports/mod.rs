pub mod articles;
pub mod topics;

pub use articles::ArticlesRepository;
pub use topics::TopicsRepository;
