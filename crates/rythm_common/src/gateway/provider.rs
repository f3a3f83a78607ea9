//! Completion providers
//!
//! A provider turns a conversation into the text of one completion, or a
//! `GatewayError`. Providers hold no conversation state; every call stands
//! alone. There are no retries: one failure is one fallback.
//!
//! - `UpstreamProvider`: the third-party OpenAI-compatible API (used by rythmd)
//! - `DaemonProvider`: a running rythmd (used by rythmctl)
//! - `FakeProvider`: scripted responses for tests

use super::protocol::{ChatMessage, CompletionRequest, CompletionResponse, GatewayRequest};
use crate::config::{ClientSettings, GatewaySettings};
use crate::error::GatewayError;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

/// Longest slice of an error body kept in `GatewayError::Status`
const MAX_ERROR_BODY: usize = 200;

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Complete a non-empty conversation and return the top choice's text
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GatewayError>;

    /// Short label for logs
    fn name(&self) -> &str;
}

fn transport_error(e: reqwest::Error, timeout_secs: u64) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout(timeout_secs)
    } else {
        GatewayError::Transport(e.to_string())
    }
}

fn truncate_body(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY).collect()
}

fn build_client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))
}

/// Bearer-authenticated OpenAI-compatible chat completion endpoint
pub struct UpstreamProvider {
    client: reqwest::Client,
    endpoint: Option<String>,
    api_key: Option<String>,
    model: String,
    timeout_secs: u64,
}

impl UpstreamProvider {
    pub fn new(settings: &GatewaySettings) -> Result<Self> {
        Ok(Self {
            client: build_client(settings.timeout_secs)?,
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            timeout_secs: settings.timeout_secs,
        })
    }

    /// Both an endpoint and a key are present
    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some() && self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionProvider for UpstreamProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GatewayError> {
        let (Some(endpoint), Some(api_key)) = (&self.endpoint, &self.api_key) else {
            return Err(GatewayError::NotConfigured);
        };

        debug!(
            "Calling provider {} with {} messages (model {})",
            endpoint,
            messages.len(),
            self.model
        );

        let body = CompletionRequest {
            model: &self.model,
            messages,
        };

        let response = self
            .client
            .post(endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout_secs))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(e, self.timeout_secs))?;

        if !status.is_success() {
            warn!("Provider returned HTTP {}: {}", status.as_u16(), truncate_body(&text));
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message: truncate_body(&text),
            });
        }

        let parsed: CompletionResponse = serde_json::from_str(&text)
            .map_err(|e| GatewayError::Malformed(format!("not a chat completion: {}", e)))?;
        parsed.into_first_content()
    }

    fn name(&self) -> &str {
        "upstream"
    }
}

/// Talks to rythmd's `/api/llama` endpoint
pub struct DaemonProvider {
    client: reqwest::Client,
    url: String,
    timeout_secs: u64,
}

impl DaemonProvider {
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        Ok(Self {
            client: build_client(settings.timeout_secs)?,
            url: settings.gateway_url(),
            timeout_secs: settings.timeout_secs,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CompletionProvider for DaemonProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GatewayError> {
        let body = GatewayRequest {
            messages: messages.to_vec(),
        };

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout_secs))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(e, self.timeout_secs))?;

        if text.is_empty() {
            return Err(GatewayError::Malformed("empty response body".to_string()));
        }

        let data: serde_json::Value = serde_json::from_str(&text)
            .map_err(|_| GatewayError::Malformed(format!("invalid JSON: {}", truncate_body(&text))))?;

        if !status.is_success() {
            let message = data
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Server error: {}", status.as_u16()));
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        match data.get("response").and_then(|r| r.as_str()) {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            Some(_) => Err(GatewayError::EmptyResponse),
            None => Err(GatewayError::Malformed("missing 'response' field".to_string())),
        }
    }

    fn name(&self) -> &str {
        "daemon"
    }
}

/// Scripted provider for tests.
///
/// With several responses queued each call pops the next one; the last one
/// left is returned forever.
pub struct FakeProvider {
    responses: Mutex<Vec<Result<String, GatewayError>>>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl FakeProvider {
    pub fn new(responses: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn always(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn always_error(error: GatewayError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Conversation received by the most recent call
    pub fn last_call(&self) -> Option<Vec<ChatMessage>> {
        self.calls.lock().ok().and_then(|c| c.last().cloned())
    }
}

#[async_trait]
impl CompletionProvider for FakeProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GatewayError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(messages.to_vec());
        }

        let mut responses = self
            .responses
            .lock()
            .map_err(|_| GatewayError::Transport("fake provider poisoned".to_string()))?;
        match responses.len() {
            0 => Err(GatewayError::EmptyResponse),
            1 => responses[0].clone(),
            _ => responses.remove(0),
        }
    }

    fn name(&self) -> &str {
        "fake"
    }
}

#[async_trait]
impl<P: CompletionProvider + ?Sized> CompletionProvider for std::sync::Arc<P> {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GatewayError> {
        (**self).complete(messages).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
