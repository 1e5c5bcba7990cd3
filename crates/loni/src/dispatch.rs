//! Sends a prompt to the configured models, one at a time, until one answers.
//!
//! Every outcome ends up as text the user can read: a reply, a
//! misconfiguration notice, or the exhaustion sentinel. Nothing here returns
//! an error to the caller.
use tracing::{debug, error, info, warn};

use crate::chat_log::{ChatLog, LogEntry};
use crate::models::message::Message;
use crate::providers::base::Provider;

pub const SYSTEM_PROMPT: &str =
    "You are LONI — an elite sovereign AI assistant. Respond clearly, precisely, and intelligently.";

pub const MISCONFIGURED_MESSAGE: &str =
    "🚫 LONI is misconfigured. No API key was provided. Please check your environment variables.";

pub const EXHAUSTED_MESSAGE: &str =
    "🚫 All models are currently unavailable or rate-limited. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// `model` produced a non-empty reply
    Reply { model: String, text: String },
    /// No credential, nothing was sent
    Misconfigured,
    /// Every candidate failed, or there were none
    Exhausted,
}

impl DispatchOutcome {
    /// The text to show as the assistant's message
    pub fn text(&self) -> &str {
        match self {
            DispatchOutcome::Reply { text, .. } => text,
            DispatchOutcome::Misconfigured => MISCONFIGURED_MESSAGE,
            DispatchOutcome::Exhausted => EXHAUSTED_MESSAGE,
        }
    }

    pub fn model(&self) -> Option<&str> {
        match self {
            DispatchOutcome::Reply { model, .. } => Some(model),
            _ => None,
        }
    }

    pub fn is_reply(&self) -> bool {
        matches!(self, DispatchOutcome::Reply { .. })
    }
}

pub struct Dispatcher {
    provider: Box<dyn Provider>,
    candidates: Vec<String>,
    chat_log: Option<ChatLog>,
}

impl Dispatcher {
    pub fn new(provider: Box<dyn Provider>, candidates: Vec<String>) -> Self {
        Self {
            provider,
            candidates,
            chat_log: None,
        }
    }

    /// Record successful exchanges in `chat_log`
    pub fn with_chat_log(mut self, chat_log: ChatLog) -> Self {
        self.chat_log = Some(chat_log);
        self
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub async fn dispatch(&self, prompt: &str) -> DispatchOutcome {
        if !self.provider.is_configured() {
            error!("Missing API key, not contacting any model");
            return DispatchOutcome::Misconfigured;
        }

        let messages = [Message::user(prompt)];

        for model in &self.candidates {
            debug!(model = %model, "sending prompt");
            match self.provider.complete(model, SYSTEM_PROMPT, &messages).await {
                Ok(completion) => {
                    let text = completion.message.content;
                    info!(model = %model, usage = ?completion.usage, "model replied");
                    self.record(model, prompt, &text);
                    return DispatchOutcome::Reply {
                        model: model.clone(),
                        text,
                    };
                }
                Err(e) => {
                    warn!(model = %model, error = %e, "model failed, trying next candidate");
                }
            }
        }

        warn!(candidates = self.candidates.len(), "all models unavailable");
        DispatchOutcome::Exhausted
    }

    fn record(&self, model: &str, prompt: &str, response: &str) {
        if let Some(chat_log) = &self.chat_log {
            if let Err(e) = chat_log.append(&LogEntry::new(model, prompt, response)) {
                warn!(error = %e, "failed to write chat log");
            }
        }
    }
}
