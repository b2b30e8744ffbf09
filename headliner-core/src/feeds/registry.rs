use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::domain::{NewTopic, Topic};

/// `{keyword}` is replaced with the lowercased topic keyword.
pub const DEFAULT_URL_TEMPLATE: &str =
    "http://feeds.bbci.co.uk/news/{keyword}/rss.xml";

const KEYWORD_PLACEHOLDER: &str = "{keyword}";

const DEFAULT_FEEDS: [(&str, &str); 3] = [
    (
        "Technology",
        "http://feeds.bbci.co.uk/news/technology/rss.xml",
    ),
    ("Sports", "http://feeds.bbci.co.uk/news/sport/rss.xml"),
    ("Politics", "http://feeds.bbci.co.uk/news/politics/rss.xml"),
];

/// Owner of the topic name to feed URL mapping.
///
/// Shared as `Arc<FeedRegistry>`; every mutation goes through
/// [`register`](Self::register) or [`remove`](Self::remove).
#[derive(Debug)]
pub struct FeedRegistry {
    template: String,
    feeds: RwLock<HashMap<String, String>>,
}

impl FeedRegistry {
    /// An empty registry deriving custom feed URLs from `template`.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            feeds: RwLock::new(HashMap::new()),
        }
    }

    /// Registry preloaded with the built-in Technology, Sports and Politics
    /// feeds.
    pub fn with_defaults(template: impl Into<String>) -> Self {
        let registry = Self::new(template);
        {
            let mut feeds = registry.feeds.write();
            for (name, url) in DEFAULT_FEEDS {
                feeds.insert(name.to_string(), url.to_string());
            }
        }
        registry
    }

    /// Topics seeded into an empty database; the keyword is the lowercased
    /// name.
    pub fn default_topics() -> Vec<NewTopic> {
        DEFAULT_FEEDS
            .iter()
            .map(|(name, _)| NewTopic::new(*name, name.to_lowercase()))
            .collect()
    }

    pub fn feed_url_for(&self, keyword: &str) -> String {
        self.template
            .replace(KEYWORD_PLACEHOLDER, &keyword.trim().to_lowercase())
    }

    pub fn lookup(&self, name: &str) -> Option<String> {
        self.feeds.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.feeds.read().contains_key(name)
    }

    /// Registered topic names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> =
            self.feeds.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.feeds.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.read().is_empty()
    }

    /// Maps `name` to the URL derived from `keyword`. Returns the new URL, or
    /// `None` without touching the mapping when `name` is already registered.
    pub fn register(&self, name: &str, keyword: &str) -> Option<String> {
        let url = self.feed_url_for(keyword);
        let mut feeds = self.feeds.write();
        if feeds.contains_key(name) {
            return None;
        }
        feeds.insert(name.to_string(), url.clone());
        debug!(topic = name, url = %url, "feed registered");
        Some(url)
    }

    pub fn remove(&self, name: &str) -> Option<String> {
        let removed = self.feeds.write().remove(name);
        if removed.is_some() {
            debug!(topic = name, "feed unregistered");
        }
        removed
    }

    /// Registers persisted topics that are not mapped yet, so custom topics
    /// keep their feed after a restart. Returns how many were added.
    pub fn hydrate(&self, topics: &[Topic]) -> usize {
        let added = topics
            .iter()
            .filter(|topic| {
                self.register(&topic.name, &topic.keyword).is_some()
            })
            .count();
        if added > 0 {
            info!(added, "restored custom topic feeds");
        }
        added
    }
}

impl Default for FeedRegistry {
    fn default() -> Self {
        Self::with_defaults(DEFAULT_URL_TEMPLATE)
    }
}
