use axum::{Form, extract::State, response::Redirect};
use headliner_core::theme::ThemeUpdate;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::infra::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct ThemeForm {
    pub bg_color: String,
}

/// Persists a valid background color. Invalid input and write failures are
/// not surfaced: the user always lands back on the main view.
pub async fn change_theme_handler(
    State(state): State<AppState>,
    Form(form): Form<ThemeForm>,
) -> Redirect {
    match state.theme.write(&form.bg_color).await {
        Ok(ThemeUpdate::Applied(color)) => {
            info!(color = %color, "theme updated")
        }
        Ok(ThemeUpdate::Rejected) => {
            debug!(candidate = %form.bg_color, "ignored invalid theme color")
        }
        Err(err) => warn!(error = %err, "failed to persist theme color"),
    }
    Redirect::to("/")
}
