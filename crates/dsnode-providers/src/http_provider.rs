//! HTTP client for the DeepSeek `/chat/completions` endpoint.
//!
//! One POST per call, Bearer auth, 30-second timeout, no retries. A fresh
//! `reqwest::Client` is built for every request so calls share nothing.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, error};

use dsnode_core::types::{ChatCompletionRequest, ChatCompletionResponse};
use dsnode_core::{ChatError, NodeConfig};

use crate::traits::ChatProvider;

/// Base URL used when the config has no `api_base`.
pub const DEFAULT_API_BASE: &str = "https://api.deepseek.com";

/// Whole-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ─────────────────────────────────────────────
// DeepSeekClient
// ─────────────────────────────────────────────

/// Talks to the DeepSeek chat completion API.
pub struct DeepSeekClient {
    /// API base URL (e.g. `"https://api.deepseek.com"`).
    api_base: String,
    /// API key for Bearer authentication.
    api_key: String,
    /// Timeout applied to each request.
    timeout: Duration,
}

impl std::fmt::Debug for DeepSeekClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepSeekClient")
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl DeepSeekClient {
    /// Create a client from the node config (api_key + optional api_base).
    pub fn new(config: &NodeConfig) -> Self {
        let api_base = config
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        DeepSeekClient {
            api_base,
            api_key: config.api_key.clone(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }

    fn build_client(&self) -> Result<reqwest::Client, ChatError> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ChatError::Unknown(format!("failed to build HTTP client: {e}")))
    }
}

/// Map a transport-level failure onto the taxonomy.
fn classify_transport_error(e: reqwest::Error) -> ChatError {
    if e.is_timeout() {
        ChatError::Timeout
    } else if e.is_connect() {
        ChatError::Connection(e.to_string())
    } else {
        ChatError::Unknown(e.to_string())
    }
}

#[async_trait]
impl ChatProvider for DeepSeekClient {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String, ChatError> {
        let client = self.build_client()?;
        let url = self.completions_url();

        debug!(
            url = %url,
            model = %request.model,
            max_tokens = request.max_tokens,
            temperature = request.temperature,
            "Calling DeepSeek"
        );

        let response = client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP request failed");
                classify_transport_error(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(status = %status, body = %error_text, "API error");
            return Err(ChatError::from_status(status.as_u16(), error_text));
        }

        let body = response.text().await.map_err(|e| {
            error!(error = %e, "Failed to read response body");
            classify_transport_error(e)
        })?;

        let parsed: ChatCompletionResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "Failed to parse chat completion response");
            ChatError::Unknown(format!("invalid response from DeepSeek API: {e}"))
        })?;

        if let Some(usage) = &parsed.usage {
            debug!(
                id = parsed.id.as_deref().unwrap_or("?"),
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "DeepSeek response received"
            );
        }

        parsed.into_content().ok_or_else(|| {
            ChatError::Unknown("response has no choices[0].message.content".to_string())
        })
    }

    fn display_name(&self) -> &str {
        "DeepSeek"
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
