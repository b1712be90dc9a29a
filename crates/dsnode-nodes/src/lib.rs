//! Workflow nodes — the host-facing node contract and the DeepSeek chat node.
//!
//! This crate contains:
//! - **base**: `Node` trait, input schema types, and input helpers
//! - **registry**: the immutable id → node mapping a host loads at startup
//! - **chat**: `DeepSeekChatNode`, text in, reply (or diagnostic) out

pub mod base;
pub mod chat;
pub mod registry;

pub use base::{InputKind, InputTypes, Node, NodeDefinition};
pub use chat::DeepSeekChatNode;
pub use registry::{default_registry, listing_registry, NodeRegistry, NodeRegistryBuilder};
