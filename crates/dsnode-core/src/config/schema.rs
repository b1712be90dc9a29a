//! Configuration schema for `config.json`.
//!
//! The on-disk keys are snake_case (`api_key`, `api_base`) so files written by
//! earlier releases of the node keep loading unchanged.

use serde::{Deserialize, Serialize};

/// File name of the configuration resource inside the install directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Credential written into a freshly created config file.
///
/// Treated as "not configured" everywhere a credential is checked.
pub const PLACEHOLDER_API_KEY: &str = "your_deepseek_api_key_here";

/// Node configuration — the DeepSeek credential and an optional endpoint base.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NodeConfig {
    /// API key for Bearer authentication.
    pub api_key: String,
    /// Custom API base URL (overrides `https://api.deepseek.com`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

impl NodeConfig {
    /// The config written on first run.
    pub fn placeholder() -> Self {
        Self {
            api_key: PLACEHOLDER_API_KEY.to_string(),
            api_base: None,
        }
    }

    /// Whether a real credential has been set (not empty, not the placeholder).
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && self.api_key != PLACEHOLDER_API_KEY
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for NodeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeConfig")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .field("api_base", &self.api_base)
            .finish()
    }
}
