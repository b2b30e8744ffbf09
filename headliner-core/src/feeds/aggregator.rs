use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use super::{FeedError, FeedFetcher, FeedRegistry, parse_feed};
use crate::domain::{FeedArticle, Topic};

/// Entries taken from each feed per render.
pub const DEFAULT_MAX_ARTICLES: usize = 10;

/// Pulls the feeds of visible topics for the main view.
#[derive(Debug, Clone)]
pub struct NewsAggregator {
    registry: Arc<FeedRegistry>,
    fetcher: Arc<dyn FeedFetcher>,
    max_articles: usize,
}

impl NewsAggregator {
    pub fn new(
        registry: Arc<FeedRegistry>,
        fetcher: Arc<dyn FeedFetcher>,
        max_articles: usize,
    ) -> Self {
        Self {
            registry,
            fetcher,
            max_articles,
        }
    }

    /// Articles from one topic's feed. A topic without a registered feed
    /// yields nothing.
    pub async fn topic_articles(
        &self,
        topic: &Topic,
    ) -> Result<Vec<FeedArticle>, FeedError> {
        let Some(url) = self.registry.lookup(&topic.name) else {
            debug!(topic = %topic.name, "no feed registered for topic");
            return Ok(Vec::new());
        };

        let body = self.fetcher.fetch(&url).await?;
        parse_feed(&body, &topic.name, self.max_articles)
    }

    /// Articles of every visible topic, fetched concurrently and kept in
    /// topic order. A failing feed is logged and contributes nothing.
    pub async fn articles_for(&self, topics: &[Topic]) -> Vec<FeedArticle> {
        let fetches = topics
            .iter()
            .filter(|topic| topic.is_visible)
            .map(|topic| async move {
                match self.topic_articles(topic).await {
                    Ok(articles) => articles,
                    Err(err) => {
                        warn!(
                            topic = %topic.name,
                            error = %err,
                            "feed unavailable"
                        );
                        Vec::new()
                    }
                }
            });

        join_all(fetches).await.into_iter().flatten().collect()
    }
}
