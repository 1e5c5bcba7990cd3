use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::ProviderResult;
use crate::models::message::Message;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// A reply produced by one model
#[derive(Debug, Clone)]
pub struct Completion {
    pub model: String,
    pub message: Message,
    pub usage: Option<Usage>,
}

/// Base trait for hosted chat-completion APIs
#[async_trait]
pub trait Provider: Send + Sync {
    /// Whether a credential is available. Callers skip the network entirely when it is not.
    fn is_configured(&self) -> bool {
        true
    }

    /// Ask `model` for the next assistant message
    async fn complete(
        &self,
        model: &str,
        system: &str,
        messages: &[Message],
    ) -> ProviderResult<Completion>;
}

#[async_trait]
impl<P: Provider + ?Sized> Provider for Arc<P> {
    fn is_configured(&self) -> bool {
        (**self).is_configured()
    }

    async fn complete(
        &self,
        model: &str,
        system: &str,
        messages: &[Message],
    ) -> ProviderResult<Completion> {
        (**self).complete(model, system, messages).await
    }
}
