use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use headliner_core::{NewsError, domain::NewTopic};
use tracing::{info, warn};

use crate::infra::{app_state::AppState, errors::AppResult};

pub async fn toggle_topic_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    let topic = state.topics().toggle_visibility(id).await?;
    info!(
        topic = %topic.name,
        visible = topic.is_visible,
        "topic visibility toggled"
    );
    Ok(Redirect::to("/"))
}

/// Adds a custom topic and registers its feed. Incomplete input and names
/// that already have a feed are ignored.
pub async fn add_topic_handler(
    State(state): State<AppState>,
    Form(form): Form<NewTopic>,
) -> AppResult<Redirect> {
    if !form.is_complete() {
        return Ok(Redirect::to("/"));
    }
    let topic = NewTopic::new(form.name.trim(), form.keyword.trim());
    if state.registry.contains(&topic.name) {
        return Ok(Redirect::to("/"));
    }

    match state.topics().create(topic).await {
        Ok(created) => {
            let registered =
                state.registry.register(&created.name, &created.keyword);
            if let Some(url) = registered {
                info!(topic = %created.name, url = %url, "custom topic added");
            }
        }
        Err(NewsError::Conflict(message)) => {
            warn!(%message, "topic already stored; skipping");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(Redirect::to("/"))
}

/// Deletes the topic, then unregisters its feed; unknown ids are a 404.
pub async fn delete_topic_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    let topics = state.topics();
    let Some(topic) = topics.get(id).await? else {
        return Err(NewsError::NotFound(format!("topic {id}")).into());
    };
    topics.delete(id).await?;
    state.registry.remove(&topic.name);
    info!(topic = %topic.name, "topic deleted");
    Ok(Redirect::to("/"))
}
