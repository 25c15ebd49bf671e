//! Router for the status check

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};

use super::public;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

/// Report that the server is up and whether the provider loaded
async fn status(State(state): State<SharedState>) -> Json<public::StatusResponse> {
    Json(public::StatusResponse {
        status: String::from("Server is running"),
        model_loaded: state.relay.is_available(),
    })
}

/// Create the status router
pub fn router() -> Router<SharedState> {
    Router::new().route("/test", get(status))
}
