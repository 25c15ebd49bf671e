pub mod core;
pub mod models;
pub use self::core::{CHAT_TIMEOUT, ChatRelay, ERROR_RESPONSE, RelayError, TIMEOUT_RESPONSE};
pub use models::*;
