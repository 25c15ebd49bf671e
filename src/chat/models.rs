//! Models for a stateless chat turn. The caller owns the conversation
//! and sends the history back on every request.

use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cohere::{ProviderHistoryEntry, ProviderRole};

/// Number of history entries kept for context and echoed back.
pub const HISTORY_WINDOW: usize = 5;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(from = "String", into = "String")]
pub enum Role {
    User,
    Assistant,
    // Kept around so it can be echoed back, but never sent upstream
    Other(String),
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => Role::Other(role),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> String {
        match role {
            Role::User => String::from("user"),
            Role::Assistant => String::from("assistant"),
            Role::Other(s) => s,
        }
    }
}

/// A single message in the conversation. Parsed from whatever the
/// client sent: the text may be under `content` or `message`, and
/// entries with a missing or non-string role, or that aren't objects
/// at all, become `Role::Other` rather than failing the request.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(from = "Value")]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl From<Value> for ChatMessage {
    fn from(entry: Value) -> Self {
        let role = match entry.get("role") {
            Some(Value::String(s)) => Role::from(s.clone()),
            // A missing role is echoed back as an empty string
            Some(Value::Null) | None => Role::Other(String::new()),
            Some(other) => Role::Other(other.to_string()),
        };
        let content = ["content", "message"]
            .iter()
            .find_map(|key| entry.get(*key).and_then(Value::as_str))
            .unwrap_or_default()
            .to_string();

        Self { role, content }
    }
}

impl ChatMessage {
    pub fn new(role: Role, content: &str) -> Self {
        Self {
            role,
            content: content.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct RawChatRequest {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    history: Option<Vec<ChatMessage>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn new(message: &str, history: Vec<ChatMessage>) -> Self {
        Self {
            message: message.to_string(),
            history,
        }
    }

    /// Parse a JSON request body. Missing or null fields become
    /// empty values so that validation can reject them later.
    pub fn parse(body: &[u8]) -> Result<Self, Error> {
        let raw: RawChatRequest = serde_json::from_slice(body)?;
        Ok(Self {
            message: raw.message.unwrap_or_default(),
            history: raw.history.unwrap_or_default(),
        })
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ChatResult {
    pub response: String,
    pub history: Vec<ChatMessage>,
}

impl ChatResult {
    pub fn new(response: &str, history: Vec<ChatMessage>) -> Self {
        Self {
            response: response.to_string(),
            history,
        }
    }
}

/// Keep the most recent `size` messages, oldest first.
pub fn window(history: &[ChatMessage], size: usize) -> Vec<ChatMessage> {
    let start = history.len().saturating_sub(size);
    history[start..].to_vec()
}

/// Relabel history into the provider's vocabulary. Messages with a
/// role other than user or assistant are dropped.
pub fn to_provider_history(history: &[ChatMessage]) -> Vec<ProviderHistoryEntry> {
    history
        .iter()
        .filter_map(|msg| {
            let role = match msg.role {
                Role::User => ProviderRole::User,
                Role::Assistant => ProviderRole::Chatbot,
                Role::Other(_) => return None,
            };
            Some(ProviderHistoryEntry::new(role, &msg.content))
        })
        .collect()
}
