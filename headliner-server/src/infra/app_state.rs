use std::{fmt, sync::Arc};

use headliner_core::{
    database::{ArticlesRepository, DatabaseContext, TopicsRepository},
    feeds::{FeedFetcher, FeedRegistry, NewsAggregator},
    theme::ThemeStore,
};

use crate::infra::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub database: DatabaseContext,
    pub theme: Arc<ThemeStore>,
    pub registry: Arc<FeedRegistry>,
    pub aggregator: Arc<NewsAggregator>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    /// Wires the theme store, feed registry and aggregator around `database`.
    pub fn new(
        config: Arc<Config>,
        database: DatabaseContext,
        fetcher: Arc<dyn FeedFetcher>,
    ) -> Self {
        let theme = Arc::new(ThemeStore::new(config.theme_path()));
        let registry = Arc::new(FeedRegistry::with_defaults(
            config.feeds.url_template.clone(),
        ));
        let aggregator = Arc::new(NewsAggregator::new(
            Arc::clone(&registry),
            fetcher,
            config.feeds.max_articles,
        ));

        Self {
            config,
            database,
            theme,
            registry,
            aggregator,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn articles(&self) -> Arc<dyn ArticlesRepository> {
        self.database.articles()
    }

    pub fn topics(&self) -> Arc<dyn TopicsRepository> {
        self.database.topics()
    }
}
