use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub theme: ThemeConfig,
    pub feeds: FeedsConfig,
    pub static_dir: PathBuf,
    pub metadata: ConfigMetadata,
}

impl Config {
    pub fn theme_path(&self) -> &Path {
        &self.theme.path
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Falls back to all interfaces when `host` is not an IP literal.
    pub fn socket_addr(&self) -> SocketAddr {
        let ip = self
            .host
            .parse()
            .unwrap_or_else(|_| std::net::Ipv4Addr::UNSPECIFIED.into());
        SocketAddr::new(ip, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct ThemeConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct FeedsConfig {
    /// Feed URL for custom topics; `{keyword}` is substituted.
    pub url_template: String,
    pub max_articles: usize,
    pub timeout: Duration,
    pub user_agent: String,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
