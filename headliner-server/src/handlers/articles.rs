use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use headliner_core::{NewsError, domain::NewArticle};
use tracing::info;

use crate::infra::{app_state::AppState, errors::AppResult};

pub async fn save_article_handler(
    State(state): State<AppState>,
    Form(article): Form<NewArticle>,
) -> AppResult<Redirect> {
    let saved = state.articles().create(article.normalized()).await?;
    info!(article_id = saved.id, topic = %saved.topic, "article saved");
    Ok(Redirect::to("/"))
}

/// Removes a saved article; unknown ids are a 404.
pub async fn delete_article_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    let articles = state.articles();
    if articles.get(id).await?.is_none() {
        return Err(NewsError::NotFound(format!("article {id}")).into());
    }
    articles.delete(id).await?;
    info!(article_id = id, "article deleted");
    Ok(Redirect::to("/saved"))
}
