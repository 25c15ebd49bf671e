use std::sync::Arc;

use crate::chat::ChatRelay;
use crate::cohere::{ChatProvider, CohereClient};
use crate::core::AppConfig;

/// Read-only state shared by every request. The provider is built
/// once at startup and never mutated afterwards.
pub struct AppState {
    pub relay: ChatRelay,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let provider: Option<Arc<dyn ChatProvider>> = match CohereClient::new(
            &config.cohere_api_hostname,
            config.cohere_api_key.as_deref(),
        ) {
            Ok(client) => {
                tracing::info!("Cohere client initialized successfully");
                Some(Arc::new(client))
            }
            Err(e) => {
                tracing::error!("Error initializing Cohere client: {}", e);
                None
            }
        };
        let relay = ChatRelay::new(provider, &config.cohere_model);

        Self { relay, config }
    }

    pub fn with_relay(relay: ChatRelay, config: AppConfig) -> Self {
        Self { relay, config }
    }
}
