use anyhow::{Context, Result};
use async_trait::async_trait;
use headliner_core::feeds::FeedRegistry;
use tracing::{info, warn};

use crate::infra::app_state::AppState;

#[async_trait]
pub trait StartupHooks: Send + Sync {
    async fn run(&self, state: &AppState) -> Result<()>;
}

/// Seeds the default topics, restores custom feed URLs and makes sure a
/// theme value is persisted.
#[derive(Debug, Default)]
pub struct ProdStartupHooks;

#[async_trait]
impl StartupHooks for ProdStartupHooks {
    async fn run(&self, state: &AppState) -> Result<()> {
        if let Err(err) = state.theme.initialize().await {
            warn!(
                error = %err,
                "Failed to initialize theme file; renders use the default"
            );
        }

        let topics = state.topics();
        for topic in FeedRegistry::default_topics() {
            let existing = topics
                .find_by_name(&topic.name)
                .await
                .with_context(|| {
                    format!("looking up default topic {}", topic.name)
                })?;
            if existing.is_none() {
                let name = topic.name.clone();
                topics
                    .create(topic)
                    .await
                    .with_context(|| format!("seeding default topic {name}"))?;
                info!(topic = %name, "Seeded default topic");
            }
        }

        let persisted = topics.list().await.context("loading topics")?;
        state.registry.hydrate(&persisted);
        info!(
            topics = persisted.len(),
            feeds = state.registry.len(),
            "Feed registry ready"
        );

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct NoopStartupHooks;

#[async_trait]
impl StartupHooks for NoopStartupHooks {
    async fn run(&self, _state: &AppState) -> Result<()> {
        Ok(())
    }
}
