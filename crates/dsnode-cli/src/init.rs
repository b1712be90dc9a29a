//! `dsnode init` — create `config.json` with a placeholder API key.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use dsnode_core::config::{get_config_path, save_config};
use dsnode_core::NodeConfig;

/// Run the init command.
pub fn run(install_dir: &Path) -> Result<()> {
    let config_path = get_config_path(install_dir);

    if config_path.exists() {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
        return Ok(());
    }

    save_config(&NodeConfig::placeholder(), &config_path)
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    println!(
        "  {} created config at {}",
        "✓".green(),
        config_path.display()
    );
    println!(
        "  {}",
        "Edit it and replace the placeholder with your DeepSeek API key.".dimmed()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsnode_core::config::{load_or_init, PLACEHOLDER_API_KEY};

    #[test]
    fn creates_placeholder_config() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path()).unwrap();

        let config = load_or_init(&get_config_path(dir.path()));
        assert_eq!(config.api_key, PLACEHOLDER_API_KEY);
    }

    #[test]
    fn keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = get_config_path(dir.path());
        std::fs::write(&path, r#"{"api_key": "sk-keep"}"#).unwrap();

        run(dir.path()).unwrap();
        assert_eq!(load_or_init(&path).api_key, "sk-keep");
    }
}
