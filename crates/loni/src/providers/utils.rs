use serde_json::{json, Value};

use super::base::Usage;
use crate::errors::{ProviderError, ProviderResult};
use crate::models::message::Message;

/// Convert internal messages to the chat-completions `messages` array
pub fn messages_to_openai_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| {
            json!({
                "role": message.role,
                "content": message.content,
            })
        })
        .collect()
}

/// Pull the assistant text out of `{choices:[{message:{content}}]}`.
///
/// An empty string is returned as-is; deciding whether it counts as a reply
/// is up to the caller. A top-level `error` only matters when there are no
/// choices.
pub fn response_text(response: &Value) -> ProviderResult<String> {
    let choice = response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .ok_or_else(|| match response.get("error") {
            Some(error) if !error.is_null() => {
                ProviderError::MalformedBody(format!("API error: {}", error))
            }
            _ => ProviderError::MalformedBody("No choices in response".to_string()),
        })?;

    let content = choice
        .get("message")
        .and_then(|message| message.get("content"))
        .ok_or_else(|| ProviderError::MalformedBody("No message content in choice".to_string()))?;

    match content {
        Value::String(text) => Ok(text.clone()),
        Value::Null => Ok(String::new()),
        other => Err(ProviderError::MalformedBody(format!(
            "Message content is not text: {}",
            other
        ))),
    }
}

pub fn get_usage(data: &Value) -> Option<Usage> {
    let usage = data.get("usage")?;

    let input_tokens = usage
        .get("prompt_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);

    let output_tokens = usage
        .get("completion_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);

    let total_tokens = usage
        .get("total_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32)
        .or_else(|| match (input_tokens, output_tokens) {
            (Some(input), Some(output)) => Some(input + output),
            _ => None,
        });

    Some(Usage::new(input_tokens, output_tokens, total_tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_to_openai_spec() {
        let messages = vec![Message::user("Hello"), Message::assistant("Hi!")];
        let spec = messages_to_openai_spec(&messages);

        assert_eq!(
            spec,
            vec![
                json!({"role": "user", "content": "Hello"}),
                json!({"role": "assistant", "content": "Hi!"}),
            ]
        );
    }

    #[test]
    fn test_response_text_valid() {
        let response = json!({
            "id": "gen-1",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hello there"},
                "finish_reason": "stop"
            }]
        });
        assert_eq!(response_text(&response).unwrap(), "Hello there");
    }

    #[test]
    fn test_response_text_null_content_is_empty() {
        let response = json!({"choices": [{"message": {"content": null}}]});
        assert_eq!(response_text(&response).unwrap(), "");
    }

    #[test]
    fn test_response_text_malformed() {
        let bodies = [
            json!({}),
            json!({"choices": []}),
            json!({"choices": [{"text": "legacy"}]}),
            json!({"choices": [{"message": {"content": 42}}]}),
            json!({"error": {"message": "Rate limit exceeded", "code": 429}}),
        ];
        for body in bodies {
            assert!(
                matches!(response_text(&body), Err(ProviderError::MalformedBody(_))),
                "body: {}",
                body
            );
        }
    }

    #[test]
    fn test_response_text_ignores_error_next_to_choices() {
        let bodies = [
            json!({"error": null, "choices": [{"message": {"content": "real answer"}}]}),
            json!({
                "error": {"message": "moderation notice"},
                "choices": [{"message": {"content": "real answer"}}]
            }),
        ];
        for body in bodies {
            assert_eq!(response_text(&body).unwrap(), "real answer", "body: {}", body);
        }
    }

    #[test]
    fn test_response_text_reports_api_error() {
        let response = json!({"error": {"message": "Rate limit exceeded", "code": 429}});
        match response_text(&response) {
            Err(ProviderError::MalformedBody(message)) => {
                assert!(message.contains("Rate limit exceeded"), "{}", message)
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_get_usage_calculated_total() {
        let response = json!({
            "usage": {
                "prompt_tokens": 10,
                "completion_tokens": 20
            }
        });

        let usage = get_usage(&response).unwrap();
        assert_eq!(usage.input_tokens, Some(10));
        assert_eq!(usage.output_tokens, Some(20));
        assert_eq!(usage.total_tokens, Some(30));
    }

    #[test]
    fn test_get_usage_missing() {
        assert_eq!(get_usage(&json!({"choices": []})), None);
    }
}
