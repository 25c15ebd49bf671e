//! API routes module

pub mod chat;
pub mod status;
pub mod web;

use std::sync::Arc;

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<AppState>;

/// Create the combined API router, mounted under `/api`
pub fn router() -> Router<SharedState> {
    Router::new()
        // Chat relay
        .nest("/chat", chat::router())
}
