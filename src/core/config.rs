use std::env;

pub const DEFAULT_COHERE_HOSTNAME: &str = "https://api.cohere.com";
pub const DEFAULT_COHERE_MODEL: &str = "command-a-03-2025";

#[derive(Clone, Debug)]
pub struct AppConfig {
    // None when the credential is missing, which disables the chat relay
    pub cohere_api_key: Option<String>,
    pub cohere_api_hostname: String,
    pub cohere_model: String,
    pub templates_path: String,
    pub static_path: String,
}

impl AppConfig {
    /// Build the config from any key lookup. `Default` uses the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let cohere_api_key = lookup("COHERE_API_KEY").filter(|k| !k.trim().is_empty());
        let cohere_api_hostname =
            lookup("COHERE_API_HOSTNAME").unwrap_or_else(|| DEFAULT_COHERE_HOSTNAME.to_string());
        let cohere_model =
            lookup("COHERE_MODEL").unwrap_or_else(|| DEFAULT_COHERE_MODEL.to_string());
        let templates_path =
            lookup("CHATRELAY_TEMPLATES_PATH").unwrap_or_else(|| "./templates".to_string());
        let static_path =
            lookup("CHATRELAY_STATIC_PATH").unwrap_or_else(|| "./static".to_string());

        Self {
            cohere_api_key,
            cohere_api_hostname,
            cohere_model,
            templates_path,
            static_path,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }
}
