use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use super::models::{
    ChatMessage, ChatRequest, ChatResult, HISTORY_WINDOW, Role, to_provider_history, window,
};
use crate::cohere::{ChatProvider, CompletionRequest};

/// How long to wait on the provider before giving up on a turn.
pub const CHAT_TIMEOUT: Duration = Duration::from_secs(15);

pub const TIMEOUT_RESPONSE: &str =
    "I'm sorry, the AI service is taking too long to respond. Please try again in a moment.";
pub const ERROR_RESPONSE: &str =
    "I'm having trouble connecting to the AI service. Please try again later.";

/// Failures that are reported to the caller as errors. Everything
/// else that goes wrong during a turn becomes a degraded `ChatResult`.
#[derive(Debug, Error, PartialEq)]
pub enum RelayError {
    #[error("Cohere client not initialized. Please check the server logs.")]
    Unavailable,
    #[error("Message cannot be empty")]
    InvalidInput,
}

/// Relays a single chat turn to the upstream provider.
///
/// The relay holds no conversation state. Each call to `handle` takes
/// the history the caller has so far and returns the updated history
/// the caller should send next time.
#[derive(Clone)]
pub struct ChatRelay {
    provider: Option<Arc<dyn ChatProvider>>,
    model: String,
    timeout: Duration,
}

impl ChatRelay {
    pub fn new(provider: Option<Arc<dyn ChatProvider>>, model: &str) -> Self {
        Self {
            provider,
            model: model.to_string(),
            timeout: CHAT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether a provider was initialized at startup.
    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn handle(&self, request: ChatRequest) -> Result<ChatResult, RelayError> {
        let provider = match &self.provider {
            Some(p) => Arc::clone(p),
            None => return Err(RelayError::Unavailable),
        };

        let message = request.message.trim();
        if message.is_empty() {
            return Err(RelayError::InvalidInput);
        }

        let recent_history = window(&request.history, HISTORY_WINDOW);
        let completion = CompletionRequest::new(
            &self.model,
            message,
            to_provider_history(&recent_history),
        );

        // Run the provider call in its own task so the deadline can be
        // enforced. If the deadline passes the task is left to finish
        // on its own and the result is discarded.
        let call = tokio::spawn(async move { provider.chat(&completion).await });

        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(Ok(reply))) => {
                let mut history = recent_history;
                history.push(ChatMessage::new(Role::User, message));
                history.push(ChatMessage::new(Role::Assistant, &reply));
                Ok(ChatResult::new(&reply, window(&history, HISTORY_WINDOW)))
            }
            Ok(Ok(Err(e))) => {
                tracing::error!("Chat provider error: {}. Root cause: {}", e, e.root_cause());
                Ok(ChatResult::new(ERROR_RESPONSE, recent_history))
            }
            Ok(Err(e)) => {
                tracing::error!("Chat provider task failed: {}", e);
                Ok(ChatResult::new(ERROR_RESPONSE, recent_history))
            }
            Err(_) => {
                tracing::error!(
                    "Request to Cohere API timed out after {}s",
                    self.timeout.as_secs_f32()
                );
                Ok(ChatResult::new(TIMEOUT_RESPONSE, recent_history))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::{Error, Result, bail};
    use async_trait::async_trait;

    use super::*;
    use crate::cohere::{ProviderHistoryEntry, ProviderRole};

    /// Records every request and answers with a canned reply.
    #[derive(Default)]
    struct FakeProvider {
        reply: String,
        delay: Option<Duration>,
        fail: bool,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl FakeProvider {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                ..Default::default()
            })
        }

        fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatProvider for FakeProvider {
        async fn chat(&self, request: &CompletionRequest) -> Result<String, Error> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                bail!("upstream exploded");
            }
            Ok(self.reply.clone())
        }
    }

    fn relay_with(provider: Arc<FakeProvider>) -> ChatRelay {
        ChatRelay::new(Some(provider as Arc<dyn ChatProvider>), "command-a-03-2025")
    }

    fn numbered(n: usize) -> Vec<ChatMessage> {
        (1..=n)
            .map(|i| {
                let role = if i % 2 == 1 { Role::User } else { Role::Assistant };
                ChatMessage::new(role, &format!("message {}", i))
            })
            .collect()
    }

    #[tokio::test]
    async fn test_hello_with_empty_history() {
        let provider = FakeProvider::replying("Hi there!");
        let relay = relay_with(provider.clone());

        let result = relay
            .handle(ChatRequest::new("Hello", vec![]))
            .await
            .unwrap();

        assert_eq!(result.response, "Hi there!");
        assert_eq!(
            result.history,
            vec![
                ChatMessage::new(Role::User, "Hello"),
                ChatMessage::new(Role::Assistant, "Hi there!"),
            ]
        );

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].message, "Hello");
        assert!(requests[0].chat_history.is_empty());
        assert_eq!(requests[0].model, "command-a-03-2025");
        assert_eq!(requests[0].temperature, 0.7);
        assert_eq!(requests[0].max_tokens, 1000);
    }

    #[tokio::test]
    async fn test_message_is_trimmed() {
        let provider = FakeProvider::replying("ok");
        let relay = relay_with(provider.clone());

        let result = relay
            .handle(ChatRequest::new("  Hello\n", vec![]))
            .await
            .unwrap();

        assert_eq!(provider.requests()[0].message, "Hello");
        assert_eq!(result.history[0], ChatMessage::new(Role::User, "Hello"));
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected_without_calling_provider() {
        let provider = FakeProvider::replying("unused");
        let relay = relay_with(provider.clone());

        for message in ["", "   ", "\n\t"] {
            let result = relay.handle(ChatRequest::new(message, numbered(3))).await;
            assert_eq!(result, Err(RelayError::InvalidInput));
        }
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_without_provider() {
        let relay = ChatRelay::new(None, "command-a-03-2025");
        assert!(!relay.is_available());

        let result = relay.handle(ChatRequest::new("Hello", vec![])).await;
        assert_eq!(result, Err(RelayError::Unavailable));
    }

    #[tokio::test]
    async fn test_only_last_five_are_forwarded() {
        let provider = FakeProvider::replying("reply");
        let relay = relay_with(provider.clone());

        let result = relay
            .handle(ChatRequest::new("next", numbered(7)))
            .await
            .unwrap();

        let forwarded: Vec<String> = provider.requests()[0]
            .chat_history
            .iter()
            .map(|e| e.message.clone())
            .collect();
        assert_eq!(
            forwarded,
            vec!["message 3", "message 4", "message 5", "message 6", "message 7"]
        );

        // The window is re-applied after the new turn is added
        assert_eq!(result.history.len(), HISTORY_WINDOW);
        assert_eq!(result.history[0], ChatMessage::new(Role::User, "message 5"));
        assert_eq!(result.history[2], ChatMessage::new(Role::User, "message 7"));
        assert_eq!(result.history[3], ChatMessage::new(Role::User, "next"));
        assert_eq!(result.history[4], ChatMessage::new(Role::Assistant, "reply"));
    }

    #[tokio::test]
    async fn test_unknown_roles_are_not_forwarded() {
        let provider = FakeProvider::replying("reply");
        let relay = relay_with(provider.clone());
        let history = vec![
            ChatMessage::new(Role::Other("system".to_string()), "be terse"),
            ChatMessage::new(Role::User, "Hi"),
        ];

        let result = relay
            .handle(ChatRequest::new("Hello", history.clone()))
            .await
            .unwrap();

        assert_eq!(
            provider.requests()[0].chat_history,
            vec![ProviderHistoryEntry::new(ProviderRole::User, "Hi")]
        );
        // Still echoed back to the caller
        assert_eq!(result.history[..2], history[..]);
    }

    #[tokio::test]
    async fn test_timeout_returns_windowed_history() {
        let provider = Arc::new(FakeProvider {
            reply: "too late".to_string(),
            delay: Some(Duration::from_secs(5)),
            ..Default::default()
        });
        let relay = relay_with(provider.clone()).with_timeout(Duration::from_millis(50));
        let history = numbered(6);

        let result = relay
            .handle(ChatRequest::new("Hello", history.clone()))
            .await
            .unwrap();

        assert_eq!(result.response, TIMEOUT_RESPONSE);
        assert_eq!(result.history, window(&history, HISTORY_WINDOW));
        assert_eq!(provider.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_provider_error_is_degraded() {
        let provider = Arc::new(FakeProvider {
            fail: true,
            ..Default::default()
        });
        let relay = relay_with(provider);
        let history = numbered(2);

        let result = relay
            .handle(ChatRequest::new("Hello", history.clone()))
            .await
            .unwrap();

        assert_eq!(result.response, ERROR_RESPONSE);
        assert_eq!(result.history, history);
    }
}
