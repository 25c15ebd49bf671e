//! Upstream chat completion provider. The relay only talks to the
//! `ChatProvider` trait so the HTTP client can be swapped out in
//! tests.

pub mod client;
pub use client::CohereClient;

use anyhow::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 1000;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum ProviderRole {
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "CHATBOT")]
    Chatbot,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ProviderHistoryEntry {
    pub role: ProviderRole,
    pub message: String,
}

impl ProviderHistoryEntry {
    pub fn new(role: ProviderRole, message: &str) -> Self {
        Self {
            role,
            message: message.to_string(),
        }
    }
}

// Body of a v1 chat request, e.g.
// {
//     "model": "command-a-03-2025",
//     "message": "Hello",
//     "chat_history": [{"role": "USER", "message": "Hi"}],
//     "temperature": 0.7,
//     "max_tokens": 1000
// }
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub message: String,
    pub chat_history: Vec<ProviderHistoryEntry>,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// A request with the fixed sampling settings used for every chat
    /// turn.
    pub fn new(model: &str, message: &str, chat_history: Vec<ProviderHistoryEntry>) -> Self {
        Self {
            model: model.to_string(),
            message: message.to_string(),
            chat_history,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// Anything that can turn a message and prior history into the next
/// reply. Shared across requests so implementations must not hold
/// per-request state.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn chat(&self, request: &CompletionRequest) -> Result<String, Error>;
}
