//! Chat-completion provider layer.
//!
//! # Architecture
//!
//! - [`traits::ChatProvider`] — trait the chat node calls through
//! - [`http_provider::DeepSeekClient`] — reqwest client for the DeepSeek
//!   `/chat/completions` endpoint

pub mod http_provider;
pub mod traits;

pub use http_provider::{DeepSeekClient, DEFAULT_API_BASE, REQUEST_TIMEOUT};
pub use traits::ChatProvider;
