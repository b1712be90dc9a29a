//! Node registry — the id → node mapping a host queries at load time.
//!
//! Built once through [`NodeRegistryBuilder`] at startup and immutable
//! afterwards; share it behind an `Arc` if several tasks need it.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::base::{Node, NodeDefinition};
use crate::chat::DeepSeekChatNode;

// ─────────────────────────────────────────────
// Builder
// ─────────────────────────────────────────────

/// Collects nodes before the registry is frozen.
#[derive(Default)]
pub struct NodeRegistryBuilder {
    nodes: HashMap<String, Arc<dyn Node>>,
}

impl NodeRegistryBuilder {
    /// Register a node. Overwrites any previous node with the same id.
    pub fn register(mut self, node: Arc<dyn Node>) -> Self {
        info!(node = node.id(), display_name = node.display_name(), "registered node");
        if let Some(prev) = self.nodes.insert(node.id().to_string(), node) {
            warn!(node = prev.id(), "replaced previously registered node");
        }
        self
    }

    /// Freeze the registry.
    pub fn build(self) -> NodeRegistry {
        NodeRegistry { nodes: self.nodes }
    }
}

// ─────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────

/// Read-only store of nodes keyed by id.
pub struct NodeRegistry {
    nodes: HashMap<String, Arc<dyn Node>>,
}

impl NodeRegistry {
    /// Start building a registry.
    pub fn builder() -> NodeRegistryBuilder {
        NodeRegistryBuilder::default()
    }

    /// Look up a node by id.
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Node>> {
        self.nodes.get(id)
    }

    /// Check if a node is registered.
    pub fn has(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Ids of all registered nodes, sorted for determinism.
    pub fn node_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.nodes.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Id → display name mapping.
    pub fn display_names(&self) -> BTreeMap<String, String> {
        self.nodes
            .iter()
            .map(|(id, node)| (id.clone(), node.display_name().to_string()))
            .collect()
    }

    /// Host-facing definitions of all registered nodes, sorted by id.
    pub fn definitions(&self) -> Vec<NodeDefinition> {
        let mut defs: Vec<NodeDefinition> =
            self.nodes.values().map(|n| n.to_definition()).collect();
        defs.sort_by(|a, b| a.id.cmp(&b.id));
        defs
    }

    /// Execute a node by id with the given inputs.
    ///
    /// The host always gets a `String` back, even on failure.
    pub async fn execute(&self, id: &str, inputs: HashMap<String, Value>) -> String {
        let node = match self.nodes.get(id) {
            Some(n) => n,
            None => {
                warn!(node = id, "node not found");
                return format!("Error: Node '{id}' not found");
            }
        };

        match node.execute(inputs).await {
            Ok(result) => result,
            Err(e) => {
                warn!(node = id, error = %e, "node execution failed");
                format!("Error executing {id}: {e}")
            }
        }
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The registry every host loads: the DeepSeek chat node, configured from
/// `config.json` inside `install_dir`.
pub fn default_registry(install_dir: &Path) -> NodeRegistry {
    NodeRegistry::builder()
        .register(Arc::new(DeepSeekChatNode::new(install_dir)))
        .build()
}

/// Same nodes as [`default_registry`], built without reading or creating
/// `config.json`. For listing and describing nodes only.
pub fn listing_registry(install_dir: &Path) -> NodeRegistry {
    NodeRegistry::builder()
        .register(Arc::new(DeepSeekChatNode::unconfigured(install_dir)))
        .build()
}
