pub mod article;
pub mod topic;

pub use article::{Article, FeedArticle, NewArticle};
pub use topic::{NewTopic, Topic};
