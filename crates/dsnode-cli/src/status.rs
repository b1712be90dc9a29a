//! `dsnode status` — show config path and credential status.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use dsnode_core::config::{get_config_path, load_or_init};
use dsnode_providers::DEFAULT_API_BASE;

use crate::helpers::mark;

/// Run the status command.
pub fn run(install_dir: &Path) -> Result<()> {
    let config_path = get_config_path(install_dir);
    let config_exists = config_path.exists();

    println!();
    println!("{}", "DeepSeek Chat node".cyan().bold());
    println!();
    println!(
        "  {:<14} {} {}",
        "Config:".bold(),
        config_path.display(),
        mark(config_exists, "(not found)")
    );

    if !config_exists {
        println!("  {}", "Run `dsnode init` to create it.".dimmed());
        println!();
        return Ok(());
    }

    let config = load_or_init(&config_path);
    let key_status = if config.is_configured() {
        format!("{} (key set)", "✓".green())
    } else {
        format!("{}", "· not configured".dimmed())
    };
    println!("  {:<14} {}", "API key:".bold(), key_status);
    println!(
        "  {:<14} {}",
        "Endpoint:".bold(),
        config.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    );
    println!();

    Ok(())
}
