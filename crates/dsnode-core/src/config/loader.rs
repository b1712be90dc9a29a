//! Config loader — reads `<install_dir>/config.json`, creating it with a
//! placeholder credential on first run.
//!
//! Loading never fails: unreadable or malformed files yield an empty
//! credential and a `warn!` line, so the node can still report the problem
//! as a diagnostic string.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::schema::{NodeConfig, CONFIG_FILE_NAME};

/// Config file path inside the given install directory.
pub fn get_config_path(install_dir: &Path) -> PathBuf {
    install_dir.join(CONFIG_FILE_NAME)
}

/// Load the config at `path`, creating it with the placeholder if absent.
///
/// A freshly created file yields an empty credential.
pub fn load_or_init(path: &Path) -> NodeConfig {
    if !path.exists() {
        match save_config(&NodeConfig::placeholder(), path) {
            Ok(()) => warn!(
                "Created default config file at {}. Please edit it to add your DeepSeek API key.",
                path.display()
            ),
            Err(e) => warn!("Failed to create config file {}: {}", path.display(), e),
        }
        return NodeConfig::default();
    }

    load_config_from_path(path)
}

/// Load config from an existing file.
fn load_config_from_path(path: &Path) -> NodeConfig {
    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Error loading config {}: {}", path.display(), e);
            return NodeConfig::default();
        }
    };

    match serde_json::from_str::<NodeConfig>(&content) {
        Ok(config) => config,
        Err(e) => {
            warn!("Error loading config {}: {}", path.display(), e);
            NodeConfig::default()
        }
    }
}

/// Save configuration to disk as pretty-printed JSON.
pub fn save_config(config: &NodeConfig, path: &Path) -> std::io::Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(path, json)?;
    debug!("Config saved to {}", path.display());
    Ok(())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PLACEHOLDER_API_KEY;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = get_config_path(dir);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_creates_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = get_config_path(dir.path());
        assert!(!path.exists());

        let config = load_or_init(&path);
        assert!(config.api_key.is_empty());
        assert!(path.exists());

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["api_key"], PLACEHOLDER_API_KEY);
    }

    #[test]
    fn test_missing_parent_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("node").join(CONFIG_FILE_NAME);

        load_or_init(&path);
        assert!(path.exists());
    }

    #[test]
    fn test_existing_file_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), r#"{"api_key": "sk-live"}"#);

        let config = load_or_init(&path);
        assert_eq!(config.api_key, "sk-live");
        assert!(std::fs::read_to_string(&path).unwrap().contains("sk-live"));
    }

    #[test]
    fn test_load_with_api_base() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"{"api_key": "sk-live", "api_base": "http://localhost:9000"}"#,
        );

        let config = load_or_init(&path);
        assert_eq!(config.api_base.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn test_invalid_json_yields_empty_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "not valid json {{{");

        let config = load_or_init(&path);
        assert!(config.api_key.is_empty());
        assert!(!config.is_configured());
    }

    #[test]
    fn test_missing_key_yields_empty_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "{}");

        assert!(load_or_init(&path).api_key.is_empty());
    }

    #[test]
    fn test_wrong_key_type_yields_empty_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), r#"{"api_key": 42}"#);

        assert!(load_or_init(&path).api_key.is_empty());
    }

    #[test]
    fn test_placeholder_file_is_not_configured() {
        let dir = tempfile::tempdir().unwrap();
        let path = get_config_path(dir.path());
        save_config(&NodeConfig::placeholder(), &path).unwrap();

        let config = load_or_init(&path);
        assert_eq!(config.api_key, PLACEHOLDER_API_KEY);
        assert!(!config.is_configured());
    }
}
