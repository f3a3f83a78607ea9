//! Wire types for the assistant gateway.
//!
//! Two hops share the same message shape:
//! - client → daemon: `{messages}` answered by `{response, success}`
//! - daemon → provider: `{model, messages}` answered by an OpenAI-style
//!   chat completion (`choices[0].message.content`)

use crate::error::{GatewayError, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

/// Body of `POST /api/llama`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayRequest {
    pub messages: Vec<ChatMessage>,
}

/// Successful `POST /api/llama` reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayReply {
    pub response: String,
    pub success: bool,
}

/// Error body for any non-2xx `POST /api/llama` reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayFailure {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Upstream provider request
#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Text of the top choice; a missing or blank completion is a failure
    pub fn into_first_content(self) -> Result<String, GatewayError> {
        let content = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Malformed("response has no choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(GatewayError::EmptyResponse);
        }
        Ok(content)
    }
}

/// Check an untyped `/api/llama` body and extract the conversation.
pub fn parse_conversation(body: &serde_json::Value) -> Result<Vec<ChatMessage>, ValidationError> {
    let raw = body
        .get("messages")
        .and_then(|m| m.as_array())
        .ok_or(ValidationError::MissingMessages)?;

    if raw.is_empty() {
        return Err(ValidationError::EmptyConversation);
    }

    raw.iter()
        .enumerate()
        .map(|(index, value)| {
            ChatMessage::deserialize(value).map_err(|e| ValidationError::InvalidMessage {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_conversation_accepts_roles() {
        let body = json!({
            "messages": [
                {"role": "system", "content": "be kind"},
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "hello"}
            ]
        });
        let messages = parse_conversation(&body).unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], ChatMessage::system("be kind"));
        assert_eq!(messages[2].role, ChatRole::Assistant);
    }

    #[test]
    fn test_parse_conversation_rejects_bad_bodies() {
        assert_eq!(
            parse_conversation(&json!({})).unwrap_err(),
            ValidationError::MissingMessages
        );
        assert_eq!(
            parse_conversation(&json!({"messages": "hi"})).unwrap_err(),
            ValidationError::MissingMessages
        );
        assert_eq!(
            parse_conversation(&json!({"messages": []})).unwrap_err(),
            ValidationError::EmptyConversation
        );

        let err = parse_conversation(&json!({
            "messages": [{"role": "user", "content": "ok"}, {"role": "robot", "content": "?"}]
        }))
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidMessage { index: 1, .. }));
    }

    #[test]
    fn test_first_content_extraction() {
        let ok: CompletionResponse = serde_json::from_value(json!({
            "id": "x",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "first"}},
                {"index": 1, "message": {"role": "assistant", "content": "second"}}
            ]
        }))
        .unwrap();
        assert_eq!(ok.into_first_content().unwrap(), "first");

        let none: CompletionResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(none.into_first_content(), Err(GatewayError::Malformed(_))));

        let blank: CompletionResponse =
            serde_json::from_value(json!({"choices": [{"message": {"content": "  "}}]})).unwrap();
        assert_eq!(blank.into_first_content(), Err(GatewayError::EmptyResponse));
    }

    #[test]
    fn test_completion_request_shape() {
        let messages = vec![ChatMessage::user("hey")];
        let body = serde_json::to_value(CompletionRequest {
            model: "llama-v1",
            messages: &messages,
        })
        .unwrap();
        assert_eq!(body, json!({"model": "llama-v1", "messages": [{"role": "user", "content": "hey"}]}));
    }
}
