use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use headliner_core::feeds::{
    DEFAULT_URL_TEMPLATE, aggregator::DEFAULT_MAX_ARTICLES,
};
use thiserror::Error;

use super::{
    models::{
        Config, ConfigMetadata, DatabaseConfig, FeedsConfig, ServerConfig,
        ThemeConfig,
    },
    sources::{EnvConfig, FileConfig},
    validation::{self, ConfigGuardRailError, ConfigWarnings},
};

const DEFAULT_CONFIG_LOCATIONS: [&str; 2] =
    ["headliner.toml", "config/headliner.toml"];

pub const DEFAULT_DATABASE_URL: &str = "sqlite://news.db?mode=rwc";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_THEME_PATH: &str = "theme.txt";
pub const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_FEED_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    /// Loads `.env`, then the TOML file, then process environment overrides.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        self.load_with_env(EnvConfig::gather(), env_file_loaded)
    }

    /// Same as [`load`](Self::load) with an explicit environment snapshot.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let (config, warnings) =
            compose_config(file_config, env, config_path, env_file_loaded)?;
        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
            {
                Some(path) => path,
                None => return Ok((None, None)),
            },
        };

        let contents =
            fs::read_to_string(&path).map_err(|source| ConfigLoadError::Io {
                path: path.clone(),
                source,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|source| {
                ConfigLoadError::Parse {
                    path: path.clone(),
                    source,
                }
            })?;

        Ok((Some(file_config), Some(path)))
    }
}

fn compose_config(
    file_config: Option<FileConfig>,
    env: EnvConfig,
    config_path: Option<PathBuf>,
    env_file_loaded: bool,
) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();

    if file_config.is_none() {
        warnings.push_with_hint(
            "No headliner.toml detected; using environment variables and defaults",
            "Create headliner.toml or set HEADLINER_CONFIG to customize feeds and storage",
        );
    }

    let FileConfig {
        server: file_server,
        database: file_database,
        theme: file_theme,
        feeds: file_feeds,
        static_dir: file_static_dir,
    } = file_config.unwrap_or_default();

    let server = ServerConfig {
        host: env
            .server_host
            .or(file_server.host)
            .unwrap_or_else(|| "0.0.0.0".to_string()),
        port: env.server_port.or(file_server.port).unwrap_or(DEFAULT_PORT),
    };

    let database = DatabaseConfig {
        url: env
            .database_url
            .or(file_database.url)
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
        max_connections: env
            .database_max_connections
            .or(file_database.max_connections)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS),
    };

    let theme = ThemeConfig {
        path: env
            .theme_path
            .or(file_theme.path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_THEME_PATH)),
    };

    let feeds = FeedsConfig {
        url_template: env
            .feed_url_template
            .or(file_feeds.url_template)
            .unwrap_or_else(|| DEFAULT_URL_TEMPLATE.to_string()),
        max_articles: env
            .feed_max_articles
            .or(file_feeds.max_articles)
            .unwrap_or(DEFAULT_MAX_ARTICLES),
        timeout: Duration::from_secs(
            env.feed_timeout_secs
                .or(file_feeds.timeout_secs)
                .unwrap_or(DEFAULT_FEED_TIMEOUT_SECS),
        ),
        user_agent: env
            .feed_user_agent
            .or(file_feeds.user_agent)
            .unwrap_or_else(|| {
                format!("headliner/{}", env!("CARGO_PKG_VERSION"))
            }),
    };

    let static_dir = env
        .static_dir
        .or(file_static_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

    let config = Config {
        server,
        database,
        theme,
        feeds,
        static_dir,
        metadata: ConfigMetadata {
            config_path,
            env_file_loaded,
        },
    };

    let guard_warnings = validation::apply_guard_rails(&config)?;
    warnings.extend(guard_warnings);

    Ok((config, warnings))
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

impl ConfigLoad {
    pub fn config_path(&self) -> Option<&Path> {
        self.config.metadata.config_path.as_deref()
    }
}
