//! Router for the landing page

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};

use super::public;
use crate::api::state::AppState;
use crate::web::{IndexContext, render_index};

type SharedState = Arc<AppState>;

async fn index(State(state): State<SharedState>) -> Response {
    let context = IndexContext {
        model: state.relay.model().to_string(),
        model_loaded: state.relay.is_available(),
    };

    match render_index(&state.config.templates_path, &context).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Error serving root page: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(public::PageErrorResponse {
                    error: String::from("Error loading the application"),
                }),
            )
                .into_response()
        }
    }
}

/// Create the landing page router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(index))
}
