//! Shared CLI helpers — install-dir resolution, input reading, output printing.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

use dsnode_core::utils::get_install_dir;

/// `--config-dir` if given, otherwise the executable's directory.
pub fn resolve_install_dir(config_dir: Option<PathBuf>) -> PathBuf {
    config_dir.unwrap_or_else(get_install_dir)
}

/// Return the `--text` argument, reading stdin when it is `-`.
pub fn read_text_arg(text: String) -> Result<String> {
    if text != "-" {
        return Ok(text);
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read text from stdin")?;
    Ok(buf)
}

/// Print a node response to stdout.
pub fn print_response(response: &str) {
    if response.is_empty() {
        println!("{}", "(no response)".dimmed());
    } else {
        println!("{response}");
    }
}

/// Green check or red marker for a yes/no status line.
pub fn mark(ok: bool, missing: &str) -> String {
    if ok {
        "✓".green().to_string()
    } else {
        missing.red().to_string()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
