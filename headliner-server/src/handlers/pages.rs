use axum::{extract::State, response::Html};
use tracing::debug;

use crate::{
    infra::{app_state::AppState, errors::AppResult},
    views::{IndexPage, SavedPage},
};

/// Main view: articles from every visible topic, freshly fetched.
pub async fn index_handler(
    State(state): State<AppState>,
) -> AppResult<Html<String>> {
    let palette = state.theme.palette().await;
    let topics = state.topics().list().await?;
    let articles = state.aggregator.articles_for(&topics).await;
    debug!(
        topics = topics.len(),
        articles = articles.len(),
        "rendering index"
    );

    Ok(Html(
        IndexPage {
            palette: &palette,
            topics: &topics,
            articles: &articles,
        }
        .render(),
    ))
}

pub async fn saved_handler(
    State(state): State<AppState>,
) -> AppResult<Html<String>> {
    let palette = state.theme.palette().await;
    let articles = state.articles().list().await?;
    let topics = state.topics().list().await?;

    Ok(Html(
        SavedPage {
            palette: &palette,
            topics: &topics,
            articles: &articles,
        }
        .render(),
    ))
}
