//! DeepSeek chat node — sends text to the chat completion API and returns
//! the reply, or a diagnostic string when anything goes wrong.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info, warn};

use dsnode_core::config::{get_config_path, load_or_init};
use dsnode_core::types::{
    ChatCompletionRequest, DEFAULT_MAX_TOKENS, DEFAULT_SYSTEM_PROMPT, DEFAULT_TEMPERATURE,
    MAX_TOKENS_RANGE, TEMPERATURE_RANGE,
};
use dsnode_core::utils::take_chars;
use dsnode_core::{ChatError, GenerationRequest, NodeConfig};
use dsnode_providers::{ChatProvider, DeepSeekClient};

use crate::base::{
    optional_bool, optional_f64, optional_i64, optional_string, require_string, InputKind,
    InputTypes, Node,
};

/// Id the node is registered under.
pub const NODE_ID: &str = "DeepSeekChatNode";
/// Name shown in the node picker.
pub const DISPLAY_NAME: &str = "DeepSeek Chat";
/// Menu category.
pub const CATEGORY: &str = "DeepSeek";

const DESCRIPTION: &str = "DeepSeek Chat API node\n\
    Sends text to the DeepSeek Chat API and returns the reply.\n\
    Make sure a valid API key is set in config.json.\n\
    Enable test mode to exercise the node without consuming API quota.";

/// Characters of input echoed back in test mode.
const TEST_MODE_PREVIEW_CHARS: usize = 30;

// ─────────────────────────────────────────────
// DeepSeekChatNode
// ─────────────────────────────────────────────

/// The chat node. The credential is read once at construction and never
/// changes for the lifetime of the instance.
pub struct DeepSeekChatNode {
    config_path: PathBuf,
    config: NodeConfig,
    provider: Arc<dyn ChatProvider>,
}

impl DeepSeekChatNode {
    /// Load (or create) `config.json` in `install_dir` and wire up the
    /// DeepSeek client.
    pub fn new(install_dir: &Path) -> Self {
        let config_path = get_config_path(install_dir);
        let config = load_or_init(&config_path);
        let provider = Arc::new(DeepSeekClient::new(&config));
        Self {
            config_path,
            config,
            provider,
        }
    }

    /// Like [`DeepSeekChatNode::new`] but with a caller-supplied provider.
    pub fn with_provider(install_dir: &Path, provider: Arc<dyn ChatProvider>) -> Self {
        let config_path = get_config_path(install_dir);
        let config = load_or_init(&config_path);
        Self {
            config_path,
            config,
            provider,
        }
    }

    /// A node that neither reads nor creates `config.json`. It describes
    /// itself normally but has no credential, so `process` only serves
    /// test mode and the missing-key diagnostic.
    pub fn unconfigured(install_dir: &Path) -> Self {
        let config = NodeConfig::default();
        Self {
            config_path: get_config_path(install_dir),
            provider: Arc::new(DeepSeekClient::new(&config)),
            config,
        }
    }

    /// Path of the config file this node was loaded from.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Whether a usable credential was loaded.
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Run one request. Always yields a string: the model reply or a
    /// diagnostic.
    pub async fn process(&self, request: GenerationRequest) -> String {
        let request = request.clamped();

        if request.test_mode {
            info!(node = NODE_ID, "test mode enabled, skipping API call");
            return test_mode_echo(&request);
        }

        if !self.config.is_configured() {
            let msg = ChatError::MissingCredential {
                config_path: self.config_path.clone(),
            }
            .diagnostic();
            warn!("{msg}");
            return msg;
        }

        let body = ChatCompletionRequest::from(&request);
        match self.provider.complete(&body).await {
            Ok(content) => content,
            Err(e) => {
                let msg = e.diagnostic();
                error!(provider = self.provider.display_name(), kind = %e, "{msg}");
                msg
            }
        }
    }
}

/// Canned reply for test mode; never touches the network.
fn test_mode_echo(request: &GenerationRequest) -> String {
    format!(
        "[Test mode] Input text: '{}...' received. In live mode the DeepSeek API \
         would be called with:\n\
         - temperature: {}\n\
         - max_tokens: {}\n\
         - system prompt: '{}'\n\
         Test mode consumes no API quota and is meant for checking node wiring and parameters.",
        take_chars(&request.text, TEST_MODE_PREVIEW_CHARS),
        request.temperature,
        request.max_tokens,
        request.system_prompt,
    )
}

/// Build a request from host inputs. Absent optional values take their
/// defaults; a present value of the wrong type is an input error.
fn request_from_inputs(inputs: &HashMap<String, Value>) -> anyhow::Result<GenerationRequest> {
    let text = require_string(inputs, "text")?;
    let max_tokens = optional_i64(inputs, "max_tokens")?
        .map(|n| n.clamp(0, u32::MAX as i64) as u32)
        .unwrap_or(DEFAULT_MAX_TOKENS);

    Ok(GenerationRequest {
        temperature: optional_f64(inputs, "temperature")?.unwrap_or(DEFAULT_TEMPERATURE),
        max_tokens,
        system_prompt: optional_string(inputs, "system_prompt")?
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        test_mode: optional_bool(inputs, "test_mode")?,
        text,
    })
}

#[async_trait]
impl Node for DeepSeekChatNode {
    fn id(&self) -> &str {
        NODE_ID
    }

    fn display_name(&self) -> &str {
        DISPLAY_NAME
    }

    fn category(&self) -> &str {
        CATEGORY
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn input_types(&self) -> InputTypes {
        InputTypes::new()
            .required(
                "text",
                InputKind::String {
                    multiline: true,
                    default: None,
                },
            )
            .optional(
                "temperature",
                InputKind::Float {
                    default: DEFAULT_TEMPERATURE,
                    min: TEMPERATURE_RANGE.0,
                    max: TEMPERATURE_RANGE.1,
                    step: 0.01,
                },
            )
            .optional(
                "max_tokens",
                InputKind::Int {
                    default: DEFAULT_MAX_TOKENS as i64,
                    min: MAX_TOKENS_RANGE.0 as i64,
                    max: MAX_TOKENS_RANGE.1 as i64,
                    step: 1,
                },
            )
            .optional(
                "system_prompt",
                InputKind::String {
                    multiline: true,
                    default: Some(DEFAULT_SYSTEM_PROMPT.to_string()),
                },
            )
            .optional("test_mode", InputKind::Boolean { default: false })
    }

    fn output_names(&self) -> &[&str] {
        &["response"]
    }

    async fn execute(&self, inputs: HashMap<String, Value>) -> anyhow::Result<String> {
        let request = request_from_inputs(&inputs)?;
        Ok(self.process(request).await)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
