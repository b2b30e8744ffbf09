use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{articles, health, pages, theme, topics},
    infra::app_state::AppState,
};

/// Builds the full application router, static assets included.
pub fn create_router(state: AppState) -> Router {
    let static_dir = ServeDir::new(state.config().static_dir());

    Router::new()
        .route("/", get(pages::index_handler))
        .route("/saved", get(pages::saved_handler))
        .route("/save_article", post(articles::save_article_handler))
        .route("/delete_article/{id}", get(articles::delete_article_handler))
        .route("/change_theme", post(theme::change_theme_handler))
        .route("/toggle_topic/{id}", post(topics::toggle_topic_handler))
        .route("/add_topic", post(topics::add_topic_handler))
        .route("/delete_topic/{id}", get(topics::delete_topic_handler))
        .route("/health", get(health::health_handler))
        .nest_service("/static", static_dir)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
