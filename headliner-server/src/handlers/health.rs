use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::warn;

use crate::infra::app_state::AppState;

/// Liveness check; reports unhealthy when the topics table cannot be read.
pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<Value>) {
    let mut health = json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    let status = match state.topics().list().await {
        Ok(topics) => {
            health["checks"]["database"] = json!({
                "status": "healthy",
                "topics": topics.len(),
            });
            health["checks"]["feeds"] = json!({
                "registered": state.registry.len(),
            });
            StatusCode::OK
        }
        Err(err) => {
            warn!(error = %err, "health check failed");
            health["status"] = json!("unhealthy");
            health["checks"]["database"] = json!({
                "status": "unhealthy",
                "error": err.to_string(),
            });
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    (status, Json(health))
}
