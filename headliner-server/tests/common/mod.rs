#![allow(dead_code)]

use std::{collections::HashMap, path::PathBuf, sync::Arc, time::Duration};

use async_trait::async_trait;
use axum_test::TestServer;
use headliner_core::{
    database::DatabaseContext,
    feeds::{FeedError, FeedFetcher},
};
use headliner_server::{
    AppState,
    infra::{
        config::{
            Config, ConfigMetadata, DatabaseConfig, FeedsConfig, ServerConfig,
            ThemeConfig,
        },
        startup::{ProdStartupHooks, StartupHooks},
    },
    routes::create_router,
};
use tempfile::TempDir;

pub const TECHNOLOGY_FEED: &str =
    "http://feeds.bbci.co.uk/news/technology/rss.xml";
pub const TEST_TEMPLATE: &str = "https://feeds.test/{keyword}.xml";

/// Serves canned feed bodies by URL; anything else is a 404.
#[derive(Debug, Default)]
pub struct StubFetcher {
    bodies: HashMap<String, String>,
}

impl StubFetcher {
    pub fn with(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }
}

#[async_trait]
impl FeedFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FeedError> {
        self.bodies.get(url).cloned().ok_or_else(|| FeedError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

pub fn rss(titles: &[&str]) -> String {
    let items: String = titles
        .iter()
        .map(|title| {
            format!(
                "<item><title>{title}</title>\
                 <link>https://news.test/{title}</link>\
                 <description>About {title}</description></item>"
            )
        })
        .collect();
    format!(
        "<?xml version=\"1.0\"?><rss version=\"2.0\">\
         <channel>{items}</channel></rss>"
    )
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub dir: TempDir,
}

impl TestApp {
    pub fn theme_path(&self) -> PathBuf {
        self.dir.path().join("theme.txt")
    }

    pub fn stored_theme(&self) -> String {
        std::fs::read_to_string(self.theme_path()).expect("theme file")
    }
}

pub fn test_config(dir: &TempDir) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        theme: ThemeConfig {
            path: dir.path().join("theme.txt"),
        },
        feeds: FeedsConfig {
            url_template: TEST_TEMPLATE.to_string(),
            max_articles: 10,
            timeout: Duration::from_secs(1),
            user_agent: "headliner-tests".to_string(),
        },
        static_dir: dir.path().join("static"),
        metadata: ConfigMetadata::default(),
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(StubFetcher::default()).await
}

pub async fn spawn_app_with(fetcher: StubFetcher) -> TestApp {
    spawn_app_configured(fetcher, |_| {}).await
}

/// In-memory database, temp theme file and the production startup hooks.
/// `configure` may adjust the config before the state is built.
pub async fn spawn_app_configured(
    fetcher: StubFetcher,
    configure: impl FnOnce(&mut Config),
) -> TestApp {
    let dir = TempDir::new().expect("tempdir");
    let mut config = test_config(&dir);
    configure(&mut config);

    let database = DatabaseContext::connect_in_memory()
        .await
        .expect("in-memory database");
    database.initialize_schema().await.expect("migrations");

    let state = AppState::new(Arc::new(config), database, Arc::new(fetcher));
    ProdStartupHooks.run(&state).await.expect("startup hooks");

    let server =
        TestServer::new(create_router(state.clone())).expect("test server");
    TestApp { server, state, dir }
}
