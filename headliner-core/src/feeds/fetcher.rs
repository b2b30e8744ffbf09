use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::FeedError;

/// Source of raw feed documents.
#[async_trait]
pub trait FeedFetcher: Send + Sync + fmt::Debug {
    async fn fetch(&self, url: &str) -> Result<String, FeedError>;
}

/// Plain `reqwest` GET with a per-request timeout. No retries.
#[derive(Debug, Clone)]
pub struct HttpFeedFetcher {
    client: reqwest::Client,
}

impl HttpFeedFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(FeedError::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FeedError> {
        let http_error = |source| FeedError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(http_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(http_error)?;
        debug!(url, bytes = body.len(), "feed downloaded");
        Ok(body)
    }
}
