use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::base::{Completion, Provider};
use super::configs::OpenRouterProviderConfig;
use super::utils::{get_usage, messages_to_openai_spec, response_text};
use crate::errors::{ProviderError, ProviderResult};
use crate::models::message::Message;

/// Client for an OpenAI-compatible chat-completions endpoint (OpenRouter by default)
pub struct OpenRouterProvider {
    client: Client,
    config: OpenRouterProviderConfig,
}

impl OpenRouterProvider {
    pub fn new(config: OpenRouterProviderConfig) -> Result<Self> {
        // No timeout: a request runs until the upstream answers or drops the connection
        let client = Client::builder().build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OpenRouterProviderConfig {
        &self.config
    }

    async fn post(&self, api_key: &str, payload: Value) -> ProviderResult<Value> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&payload)
            .send()
            .await?;

        // Error statuses still carry a JSON body without `choices`, which is
        // reported as malformed by the parser.
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, "upstream responded");

        serde_json::from_str(&body).map_err(|e| {
            ProviderError::MalformedBody(format!("Status {}, body is not JSON: {}", status, e))
        })
    }
}

#[async_trait]
impl Provider for OpenRouterProvider {
    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn complete(
        &self,
        model: &str,
        system: &str,
        messages: &[Message],
    ) -> ProviderResult<Completion> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential)?;

        let system_message = json!({
            "role": "system",
            "content": system
        });

        let mut messages_array = vec![system_message];
        messages_array.extend(messages_to_openai_spec(messages));

        let payload = json!({
            "model": model,
            "messages": messages_array
        });

        let response = self.post(api_key, payload).await?;

        let text = response_text(&response)?;
        if text.is_empty() {
            return Err(ProviderError::EmptyReply(model.to_string()));
        }

        Ok(Completion {
            model: model.to_string(),
            message: Message::assistant(text),
            usage: get_usage(&response),
        })
    }
}
