//! Feed registry, RSS/Atom parsing, and HTTP retrieval.

pub mod aggregator;
pub mod fetcher;
pub mod image;
pub mod parser;
pub mod registry;

use thiserror::Error;

pub use aggregator::NewsAggregator;
pub use fetcher::{FeedFetcher, HttpFeedFetcher};
pub use image::{ImageExtractError, extract_image_url};
pub use parser::parse_feed;
pub use registry::{DEFAULT_URL_TEMPLATE, FeedRegistry};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
    #[error("malformed feed: {0}")]
    Parse(String),
}
