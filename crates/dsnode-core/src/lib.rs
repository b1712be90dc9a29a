//! Core building blocks for the DeepSeek chat node.
//!
//! - [`config`] — `config.json` schema, loading, and first-run creation
//! - [`types`] — chat completion wire types and the per-call generation request
//! - [`error`] — the failure taxonomy and its operator-facing diagnostics
//! - [`utils`] — install-dir resolution and string helpers

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use config::NodeConfig;
pub use error::ChatError;
pub use types::GenerationRequest;
