//! Public types for the chat API

// The request body is parsed by `ChatRequest::parse` so that either
// `content` or `message` is accepted for history text.
pub use crate::chat::{ChatMessage, ChatRequest, Role};

/// `{"response": "...", "history": [{"role": "user", "content": "..."}]}`
pub type ChatResponse = crate::chat::ChatResult;
