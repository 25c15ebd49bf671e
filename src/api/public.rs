//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::chat::RelayError;

// Errors

/// Body of every error response, e.g. `{"detail": "Message cannot be empty"}`
#[derive(Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

pub struct ApiError(anyhow::Error);

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Always log the error
        tracing::error!("{}", self.0);

        let (status, detail) = match self.0.downcast_ref::<RelayError>() {
            Some(RelayError::InvalidInput) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            Some(RelayError::Unavailable) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string())
            }
            None => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Something went wrong: {}", self.0),
            ),
        };

        (status, Json(ErrorDetail { detail })).into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// Re-export public types from each route

pub mod chat {
    pub use crate::api::routes::chat::public::*;
}

pub mod status {
    pub use crate::api::routes::status::public::*;
}

pub mod web {
    pub use crate::api::routes::web::public::*;
}
