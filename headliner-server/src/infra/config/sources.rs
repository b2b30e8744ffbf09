use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub database: FileDatabaseConfig,
    #[serde(default)]
    pub theme: FileThemeConfig,
    #[serde(default)]
    pub feeds: FileFeedsConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileDatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileFeedsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_articles: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub database_url: Option<String>,
    pub database_max_connections: Option<u32>,
    pub theme_path: Option<PathBuf>,
    pub feed_url_template: Option<String>,
    pub feed_max_articles: Option<usize>,
    pub feed_timeout_secs: Option<u64>,
    pub feed_user_agent: Option<String>,
    pub static_dir: Option<PathBuf>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name).filter(|value| !value.trim().is_empty())
        };

        Self {
            config_path: var("HEADLINER_CONFIG").map(PathBuf::from),
            server_host: var("SERVER_HOST"),
            server_port: var("SERVER_PORT")
                .and_then(|value| value.trim().parse().ok()),
            database_url: var("DATABASE_URL"),
            database_max_connections: var("DATABASE_MAX_CONNECTIONS")
                .and_then(|value| value.trim().parse().ok()),
            theme_path: var("THEME_PATH").map(PathBuf::from),
            feed_url_template: var("FEED_URL_TEMPLATE"),
            feed_max_articles: var("FEED_MAX_ARTICLES")
                .and_then(|value| value.trim().parse().ok()),
            feed_timeout_secs: var("FEED_TIMEOUT_SECS")
                .and_then(|value| value.trim().parse().ok()),
            feed_user_agent: var("FEED_USER_AGENT"),
            static_dir: var("STATIC_DIR").map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> EnvConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn reads_and_parses_known_variables() {
        let config = env(&[
            ("SERVER_PORT", "8080"),
            ("DATABASE_URL", "sqlite://test.db"),
            ("FEED_MAX_ARTICLES", " 5 "),
            ("THEME_PATH", "/tmp/theme.txt"),
        ]);
        assert_eq!(config.server_port, Some(8080));
        assert_eq!(config.database_url.as_deref(), Some("sqlite://test.db"));
        assert_eq!(config.feed_max_articles, Some(5));
        assert_eq!(config.theme_path, Some(PathBuf::from("/tmp/theme.txt")));
    }

    #[test]
    fn blank_and_unparseable_values_are_ignored() {
        let config =
            env(&[("SERVER_PORT", "not-a-port"), ("SERVER_HOST", "  ")]);
        assert_eq!(config.server_port, None);
        assert_eq!(config.server_host, None);
    }

    #[test]
    fn file_config_parses_partial_toml() {
        let file: FileConfig = toml::from_str(
            r#"
            [server]
            port = 9000

            [feeds]
            max_articles = 3
            "#,
        )
        .unwrap();
        assert_eq!(file.server.port, Some(9000));
        assert_eq!(file.server.host, None);
        assert_eq!(file.feeds.max_articles, Some(3));
        assert!(file.static_dir.is_none());
    }
}
