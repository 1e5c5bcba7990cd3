use async_trait::async_trait;
use std::sync::Mutex;

use crate::errors::{ProviderError, ProviderResult};
use crate::models::message::Message;
use crate::providers::base::{Completion, Provider};

/// A mock provider that plays back pre-configured replies and records which models were asked
pub struct MockProvider {
    configured: bool,
    responses: Mutex<Vec<Result<String, String>>>,
    calls: Mutex<Vec<String>>,
}

impl MockProvider {
    /// `Ok(text)` becomes a reply, `Err(reason)` a malformed-body failure
    pub fn new(responses: Vec<Result<String, String>>) -> Self {
        Self {
            configured: true,
            responses: Mutex::new(responses),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new(Vec::new())
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn complete(
        &self,
        model: &str,
        _system: &str,
        _messages: &[Message],
    ) -> ProviderResult<Completion> {
        self.calls.lock().unwrap().push(model.to_string());

        let mut responses = self.responses.lock().unwrap();
        let next = if responses.is_empty() {
            Ok(String::new())
        } else {
            responses.remove(0)
        };

        match next {
            Ok(text) if text.is_empty() => Err(ProviderError::EmptyReply(model.to_string())),
            Ok(text) => Ok(Completion {
                model: model.to_string(),
                message: Message::assistant(text),
                usage: None,
            }),
            Err(reason) => Err(ProviderError::MalformedBody(reason)),
        }
    }
}
