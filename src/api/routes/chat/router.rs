//! Router for the chat API

use std::sync::Arc;

use axum::{Json, Router, body::Bytes, extract::State, routing::post};

use super::public;
use crate::api::state::AppState;
use crate::chat::{ERROR_RESPONSE, RelayError};

type SharedState = Arc<AppState>;

/// Relay a chat turn to the provider and return the reply along with
/// the history the client should send on the next turn.
///
/// The body is read as raw bytes rather than with the `Json`
/// extractor so clients that omit the content type still work and so
/// a malformed body gets a degraded reply instead of a rejection.
async fn chat_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<public::ChatResponse>, crate::api::public::ApiError> {
    if !state.relay.is_available() {
        return Err(RelayError::Unavailable.into());
    }

    let request = match public::ChatRequest::parse(&body) {
        Ok(req) => req,
        Err(e) => {
            tracing::error!("Unexpected error reading chat request: {}", e);
            return Ok(Json(public::ChatResponse::new(ERROR_RESPONSE, vec![])));
        }
    };

    let result = state.relay.handle(request).await?;

    Ok(Json(result))
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(chat_handler))
}
