use anyhow::Result;
use tracing::warn;

use super::ProviderConfig;

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct:free";

pub const ENDPOINT_VAR: &str = "OPENROUTER_API";
pub const API_KEY_VAR: &str = "OPENROUTER_KEY";
pub const MODELS_VAR: &str = "OPENROUTER_MODELS";

#[derive(Debug, Clone, PartialEq)]
pub struct OpenRouterProviderConfig {
    /// Full chat-completions URL, requests are posted here as-is
    pub endpoint: String,
    pub api_key: Option<String>,
    /// Candidate models in the order they are tried
    pub models: Vec<String>,
}

impl OpenRouterProviderConfig {
    pub fn new(endpoint: String, api_key: Option<String>, models: Vec<String>) -> Self {
        Self {
            endpoint,
            api_key,
            models,
        }
    }

    /// Build a config from raw values, applying the same defaults as `from_env`.
    /// A blank key counts as no key.
    pub fn from_values(
        endpoint: Option<String>,
        api_key: Option<String>,
        models: Option<String>,
    ) -> Self {
        let endpoint = endpoint
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let models = parse_model_pool(models.as_deref().unwrap_or("[]"));

        Self::new(endpoint, api_key, models)
    }
}

impl ProviderConfig for OpenRouterProviderConfig {
    fn from_env() -> Result<Self> {
        let endpoint = Self::get_env(ENDPOINT_VAR, false, None)?;
        // A missing key is reported to the user at send time, not at startup
        let api_key = Self::get_env(API_KEY_VAR, false, None)?;
        let models = Self::get_env(MODELS_VAR, false, None)?;

        Ok(Self::from_values(endpoint, api_key, models))
    }
}

/// Parse the candidate list from a JSON array of model ids.
///
/// Anything that is not a non-empty array of strings falls back to
/// [`DEFAULT_MODEL`].
pub fn parse_model_pool(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(models) if !models.is_empty() => models,
        Ok(_) => {
            warn!("Model pool is empty, falling back to {}", DEFAULT_MODEL);
            vec![DEFAULT_MODEL.to_string()]
        }
        Err(e) => {
            warn!("Failed to parse model pool: {}", e);
            vec![DEFAULT_MODEL.to_string()]
        }
    }
}
