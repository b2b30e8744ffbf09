use thiserror::Error;

use super::models::Config;

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigGuardRailError {
    #[error("DATABASE_URL must be a sqlite: URL, got '{0}'")]
    UnsupportedDatabase(String),
    #[error("feed URL template '{0}' does not contain the {{keyword}} placeholder")]
    TemplateWithoutKeyword(String),
    #[error("feeds.max_articles must be at least 1")]
    NoArticles,
    #[error("server port must be non-zero")]
    InvalidPort,
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if !config.database.url.starts_with("sqlite:") {
        return Err(ConfigGuardRailError::UnsupportedDatabase(
            config.database.url.clone(),
        ));
    }
    if !config.feeds.url_template.contains("{keyword}") {
        return Err(ConfigGuardRailError::TemplateWithoutKeyword(
            config.feeds.url_template.clone(),
        ));
    }
    if config.feeds.max_articles == 0 {
        return Err(ConfigGuardRailError::NoArticles);
    }
    if config.server.port == 0 {
        return Err(ConfigGuardRailError::InvalidPort);
    }

    if config.database.url.contains(":memory:") {
        warnings.push_with_hint(
            "Using an in-memory database; saved articles and topics are lost on exit",
            "Point DATABASE_URL at a file, e.g. sqlite://news.db?mode=rwc",
        );
    }
    if !config.static_dir.is_dir() {
        warnings.push_with_hint(
            format!(
                "Static directory {} not found; stylesheet and scripts will 404",
                config.static_dir.display()
            ),
            "Set STATIC_DIR or static_dir in headliner.toml",
        );
    }
    if config.feeds.timeout.is_zero() {
        warnings.push(
            "feeds.timeout_secs is 0; every feed request will time out",
        );
    }

    Ok(warnings)
}
