//! Core types — the per-call generation request and the OpenAI-compatible
//! chat completion wire format spoken by the DeepSeek API.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Model requested from the DeepSeek API.
pub const DEFAULT_MODEL: &str = "deepseek-chat";
/// Default system preamble.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
/// Default completion length.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Inclusive temperature bounds accepted by the node.
pub const TEMPERATURE_RANGE: (f64, f64) = (0.0, 2.0);
/// Inclusive `max_tokens` bounds accepted by the node.
pub const MAX_TOKENS_RANGE: (u32, u32) = (1, 8192);

// ─────────────────────────────────────────────
// Generation request
// ─────────────────────────────────────────────

/// One invocation of the chat node. Built per call, never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
    /// User text forwarded as the `user` message.
    pub text: String,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
    /// Maximum tokens to generate (1 – 8192).
    pub max_tokens: u32,
    /// Content of the `system` message.
    pub system_prompt: String,
    /// Skip the network entirely and echo the parameters back.
    pub test_mode: bool,
}

impl GenerationRequest {
    /// A request with default parameters for the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            test_mode: false,
        }
    }

    /// Clamp `temperature` and `max_tokens` into their accepted ranges.
    ///
    /// The host widgets normally enforce the bounds; values arriving from
    /// elsewhere are pulled back in range with a warning instead of failing.
    pub fn clamped(mut self) -> Self {
        let (t_min, t_max) = TEMPERATURE_RANGE;
        if self.temperature.is_nan() {
            warn!("temperature is NaN, using default {}", DEFAULT_TEMPERATURE);
            self.temperature = DEFAULT_TEMPERATURE;
        } else if !(t_min..=t_max).contains(&self.temperature) {
            let clamped = self.temperature.clamp(t_min, t_max);
            warn!(requested = self.temperature, clamped, "temperature out of range");
            self.temperature = clamped;
        }

        let (m_min, m_max) = MAX_TOKENS_RANGE;
        if !(m_min..=m_max).contains(&self.max_tokens) {
            let clamped = self.max_tokens.clamp(m_min, m_max);
            warn!(requested = self.max_tokens, clamped, "max_tokens out of range");
            self.max_tokens = clamped;
        }
        self
    }
}

// ─────────────────────────────────────────────
// Messages (OpenAI chat completions format)
// ─────────────────────────────────────────────

/// A chat message; each variant maps to a `role` field value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role")]
pub enum Message {
    #[serde(rename = "system")]
    System { content: String },

    #[serde(rename = "user")]
    User { content: String },
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Message::System {
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Message::User {
            content: content.into(),
        }
    }
}

// ─────────────────────────────────────────────
// Chat completion request
// ─────────────────────────────────────────────

/// Request body for the `/chat/completions` endpoint.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub stream: bool,
}

impl From<&GenerationRequest> for ChatCompletionRequest {
    fn from(req: &GenerationRequest) -> Self {
        ChatCompletionRequest {
            model: DEFAULT_MODEL.to_string(),
            messages: vec![
                Message::system(req.system_prompt.as_str()),
                Message::user(req.text.as_str()),
            ],
            temperature: req.temperature,
            max_tokens: req.max_tokens,
            stream: false,
        }
    }
}

// ─────────────────────────────────────────────
// Chat completion response
// ─────────────────────────────────────────────

/// Raw chat completion response. Only the fields the node reads are modelled.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: Option<String>,
    pub choices: Vec<ChatChoice>,
    pub usage: Option<UsageInfo>,
}

impl ChatCompletionResponse {
    /// `choices[0].message.content`, if present.
    pub fn into_content(self) -> Option<String> {
        self.choices.into_iter().next()?.message.content
    }
}

/// A single choice in a chat completion response.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: AssistantMessage,
    pub finish_reason: Option<String>,
}

/// The assistant message within a chat completion choice.
#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
}

/// Token usage statistics.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UsageInfo {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
