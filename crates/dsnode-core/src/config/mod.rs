//! Configuration system — schema, loading, and first-run creation.
//!
//! # Usage
//! ```no_run
//! use dsnode_core::config;
//! use dsnode_core::utils::get_install_dir;
//!
//! let path = config::get_config_path(&get_install_dir());
//! let cfg = config::load_or_init(&path);
//! println!("Configured: {}", cfg.is_configured());
//! ```

pub mod loader;
pub mod schema;

// Re-export key types
pub use loader::{get_config_path, load_or_init, save_config};
pub use schema::{NodeConfig, CONFIG_FILE_NAME, PLACEHOLDER_API_KEY};
