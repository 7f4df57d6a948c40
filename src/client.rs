//! HTTP client for OpenAI-compatible chat-completion endpoints
//!
//! One POST per call, non-streaming. Response parsing is deliberately lenient:
//! a body missing the expected keys yields [`NO_CONTENT_SENTINEL`] instead of
//! an error.

use crate::config::ProbeConfig;
use crate::conversation::ChatMessage;
use crate::error::{ProbeError, ProbeResult};
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;

/// Printed in place of the model reply when the response carries no content
pub const NO_CONTENT_SENTINEL: &str = "No content received.";

/// Request ID header name
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Maximum number of characters of an error body kept for diagnostics
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Chat-completion request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub stream: bool,
}

impl<'a> ChatCompletionRequest<'a> {
    pub fn new(model: &'a str, messages: &'a [ChatMessage]) -> Self {
        Self {
            model,
            messages,
            stream: false,
        }
    }
}

/// Chat-completion response body
///
/// Every field is optional so that partial responses still deserialize.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Option<Vec<Choice>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Extract `choices[0].message.content`
    ///
    /// Absent (or null) `choices`, `message` or `content` yields the sentinel.
    /// An explicitly empty `choices` array has no first element to read and is
    /// reported as a malformed response.
    pub fn content(&self) -> ProbeResult<String> {
        let Some(choices) = &self.choices else {
            return Ok(NO_CONTENT_SENTINEL.to_string());
        };

        let first = choices.first().ok_or_else(|| {
            ProbeError::Unexpected("response contained an empty 'choices' array".to_string())
        })?;

        Ok(first
            .message
            .as_ref()
            .and_then(|m| m.content.clone())
            .unwrap_or_else(|| NO_CONTENT_SENTINEL.to_string()))
    }
}

/// Client bound to one endpoint and model
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    timeout_seconds: u64,
}

impl CompletionClient {
    /// Create a client from validated configuration
    pub fn new(config: &ProbeConfig) -> ProbeResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ProbeError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
            model: config.model().to_string(),
            timeout_seconds: config.timeout_seconds(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one conversation and return the assistant content
    ///
    /// Messages are sent verbatim and in order. No retries.
    pub async fn complete(&self, messages: &[ChatMessage]) -> ProbeResult<String> {
        let request_id = Uuid::new_v4();
        let body = ChatCompletionRequest::new(&self.model, messages);
        let payload = serde_json::to_vec(&body)
            .map_err(|e| ProbeError::Unexpected(format!("failed to encode request: {}", e)))?;

        tracing::debug!(
            request_id = %request_id,
            endpoint = %self.endpoint,
            model = %self.model,
            message_count = messages.len(),
            "Sending chat completion request"
        );

        let start = Instant::now();
        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .body(payload)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.classify(e))?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            tracing::warn!(
                request_id = %request_id,
                status = %status,
                elapsed_ms,
                "Chat completion request returned error status"
            );
            return Err(ProbeError::Status {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
                body: truncate_chars(&text, MAX_ERROR_BODY_CHARS),
            });
        }

        tracing::info!(
            request_id = %request_id,
            status = %status,
            elapsed_ms,
            "Chat completion request succeeded"
        );

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| ProbeError::Unexpected(format!("invalid JSON response: {}", e)))?;

        parsed.content()
    }

    fn classify(&self, err: reqwest::Error) -> ProbeError {
        if err.is_timeout() {
            ProbeError::Timeout {
                endpoint: self.endpoint.clone(),
                timeout_seconds: self.timeout_seconds,
            }
        } else {
            ProbeError::Transport {
                endpoint: self.endpoint.clone(),
                reason: error_chain(&err.without_url()),
            }
        }
    }
}

/// Join an error and its `source()` chain into one line
///
/// reqwest's own message is generic; the OS or resolver cause is further down.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut parts: Vec<String> = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        let msg = cause.to_string();
        if parts.last() != Some(&msg) {
            parts.push(msg);
        }
        source = cause.source();
    }
    parts.join(": ")
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
