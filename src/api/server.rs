use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use axum::middleware;
use axum::{Router, extract::Request, response::Response};
use http::{HeaderValue, header};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::routes;
use crate::api::state::AppState;
use crate::core::AppConfig;

async fn set_static_cache_control(request: Request, next: middleware::Next) -> Response {
    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    response
}

pub fn app(shared_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::permissive();
    let static_path = shared_state.config.static_path.clone();

    Router::new()
        // Landing page
        .merge(routes::web::router())
        // Health check
        .merge(routes::status::router())
        // API routes
        .nest("/api", routes::router())
        // Static assets used by the landing page
        .nest_service(
            "/static",
            ServiceBuilder::new()
                .layer(middleware::from_fn(set_static_cache_control))
                .service(ServeDir::new(static_path)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

// Run the server
pub async fn serve(host: String, port: u16, config: AppConfig) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs rejections from built-in extractors with the `axum::rejection`
                // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                format! {
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                }
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The landing page expects these to exist even when empty
    let js_path = Path::new(&config.static_path).join("js");
    tokio::fs::create_dir_all(&js_path).await?;

    let app_state = AppState::new(config);
    if !app_state.relay.is_available() {
        tracing::warn!("Starting without a chat provider. Set COHERE_API_KEY to enable chat.");
    }
    let app = app(Arc::new(app_state));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;

    tracing::debug!("Server started. Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
