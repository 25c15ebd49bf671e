//! Test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::sync::Arc;

use axum::{Router, body::Body};
use tempfile::TempDir;

use chatrelay::api::AppState;
use chatrelay::api::app;
use chatrelay::chat::ChatRelay;
use chatrelay::core::AppConfig;

pub const TEST_INDEX_HTML: &str = r#"<html>
<body>
<h1>Chat with {{model}}</h1>
{{#if model_loaded}}<p>Ready</p>{{else}}<p>Offline</p>{{/if}}
<script src="/static/js/chat.js"></script>
</body>
</html>
"#;

/// Holds the temporary directories alive for as long as the test
/// needs the app.
pub struct TestApp {
    pub router: Router,
    pub dir: TempDir,
}

/// Creates a config with temporary template and static directories
/// pointing the provider at `api_hostname`.
pub fn test_config(dir: &TempDir, api_hostname: &str, api_key: Option<&str>) -> AppConfig {
    let templates_path = dir.path().join("templates");
    let static_path = dir.path().join("static");
    fs::create_dir_all(&templates_path).expect("Failed to create templates directory");
    fs::create_dir_all(static_path.join("js")).expect("Failed to create static directory");
    fs::write(templates_path.join("index.html"), TEST_INDEX_HTML)
        .expect("Failed to write index template");
    fs::write(static_path.join("js").join("chat.js"), "// chat client\n")
        .expect("Failed to write static asset");

    AppConfig {
        cohere_api_key: api_key.map(String::from),
        cohere_api_hostname: api_hostname.to_string(),
        cohere_model: String::from("command-a-03-2025"),
        templates_path: templates_path.display().to_string(),
        static_path: static_path.display().to_string(),
    }
}

/// Creates a test application router. Pass the URL of a mock server
/// for the provider, or `None` for an app without an API key.
pub fn test_app(api_hostname: Option<&str>) -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = match api_hostname {
        Some(url) => test_config(&dir, url, Some("test-api-key")),
        None => test_config(&dir, "http://localhost:1", None),
    };
    let router = app(Arc::new(AppState::new(config)));
    TestApp { router, dir }
}

/// Creates a test application router around an existing relay.
pub fn test_app_with_relay(relay: ChatRelay) -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(&dir, "http://localhost:1", Some("test-api-key"));
    let router = app(Arc::new(AppState::with_relay(relay, config)));
    TestApp { router, dir }
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not utf-8")
}

pub async fn body_to_json(body: Body) -> serde_json::Value {
    let body = body_to_string(body).await;
    serde_json::from_str(&body).expect("Body is not JSON")
}
