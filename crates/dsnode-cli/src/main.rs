//! dsnode CLI — entry point.
//!
//! Stands in for a workflow host: builds the node registry and invokes nodes.
//!
//! # Commands
//!
//! - `dsnode run -t TEXT [--test-mode] ...` — run a node once and print its output
//! - `dsnode nodes [--json]` — list registered nodes
//! - `dsnode init` — create `config.json` with a placeholder key
//! - `dsnode status` — show config path and credential status

mod helpers;
mod init;
mod nodes_cmd;
mod status;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::info;

use dsnode_nodes::chat::NODE_ID;
use dsnode_nodes::default_registry;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Send text to the DeepSeek Chat API through the workflow node
#[derive(Parser)]
#[command(name = "dsnode", version, about, long_about = None)]
struct Cli {
    /// Directory holding config.json (defaults to the executable's directory)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a node once and print its output
    Run {
        /// Input text ("-" reads stdin)
        #[arg(short, long)]
        text: String,

        /// Sampling temperature (0.0 – 2.0)
        #[arg(long)]
        temperature: Option<f64>,

        /// Maximum tokens to generate (1 – 8192)
        #[arg(long)]
        max_tokens: Option<i64>,

        /// System prompt
        #[arg(long)]
        system_prompt: Option<String>,

        /// Echo parameters back without calling the API
        #[arg(long, default_value_t = false)]
        test_mode: bool,

        /// Node to run
        #[arg(long, default_value = NODE_ID)]
        node: String,
    },

    /// List registered nodes
    Nodes {
        /// Print full node definitions as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Create config.json with a placeholder API key
    Init,

    /// Show config path and credential status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logs);

    let install_dir = helpers::resolve_install_dir(cli.config_dir);

    match cli.command {
        Commands::Run {
            text,
            temperature,
            max_tokens,
            system_prompt,
            test_mode,
            node,
        } => {
            let text = helpers::read_text_arg(text)?;
            let inputs = build_inputs(text, temperature, max_tokens, system_prompt, test_mode);
            let registry = default_registry(&install_dir);

            info!(node = %node, "running node");
            let output = registry.execute(&node, inputs).await;
            helpers::print_response(&output);
            Ok(())
        }
        Commands::Nodes { json } => nodes_cmd::run(&install_dir, json),
        Commands::Init => init::run(&install_dir),
        Commands::Status => status::run(&install_dir),
    }
}

/// Map CLI flags onto the node's named inputs.
fn build_inputs(
    text: String,
    temperature: Option<f64>,
    max_tokens: Option<i64>,
    system_prompt: Option<String>,
    test_mode: bool,
) -> HashMap<String, Value> {
    let mut inputs = HashMap::new();
    inputs.insert("text".to_string(), json!(text));
    if let Some(t) = temperature {
        inputs.insert("temperature".to_string(), json!(t));
    }
    if let Some(n) = max_tokens {
        inputs.insert("max_tokens".to_string(), json!(n));
    }
    if let Some(p) = system_prompt {
        inputs.insert("system_prompt".to_string(), json!(p));
    }
    inputs.insert("test_mode".to_string(), json!(test_mode));
    inputs
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("dsnode=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_run_defaults() {
        let cli = Cli::try_parse_from(["dsnode", "run", "-t", "hello"]).unwrap();
        match cli.command {
            Commands::Run {
                text,
                temperature,
                test_mode,
                node,
                ..
            } => {
                assert_eq!(text, "hello");
                assert!(temperature.is_none());
                assert!(!test_mode);
                assert_eq!(node, "DeepSeekChatNode");
            }
            _ => panic!("expected run"),
        }
        assert!(cli.config_dir.is_none());
    }

    #[test]
    fn parse_global_config_dir() {
        let cli =
            Cli::try_parse_from(["dsnode", "status", "--config-dir", "/tmp/node"]).unwrap();
        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/node")));
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn parse_run_requires_text() {
        assert!(Cli::try_parse_from(["dsnode", "run"]).is_err());
    }

    #[test]
    fn build_inputs_only_sets_given_flags() {
        let inputs = build_inputs("hi".into(), None, Some(64), None, true);
        assert_eq!(inputs["text"], json!("hi"));
        assert_eq!(inputs["max_tokens"], json!(64));
        assert_eq!(inputs["test_mode"], json!(true));
        assert!(!inputs.contains_key("temperature"));
        assert!(!inputs.contains_key("system_prompt"));
    }

    #[tokio::test]
    async fn run_test_mode_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let registry = default_registry(dir.path());
        let inputs = build_inputs("check the wiring".into(), Some(0.2), None, None, true);

        let output = registry.execute(NODE_ID, inputs).await;
        assert!(output.contains("check the wiring"));
        assert!(output.contains("temperature: 0.2"));
    }
}
