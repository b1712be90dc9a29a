//! Chat provider trait — the seam between the node and the network.
//!
//! The node only ever sees this trait, so tests can count or fake calls
//! without an HTTP server.

use async_trait::async_trait;
use dsnode_core::types::ChatCompletionRequest;
use dsnode_core::ChatError;

/// A backend that answers one chat completion request.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a single chat completion request.
    ///
    /// Returns `choices[0].message.content` on HTTP 200, otherwise the
    /// classified failure.
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String, ChatError>;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}
