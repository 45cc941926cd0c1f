mod config;

pub use config::{Config, ServerConfig};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns the data directory, creating it if needed.
///
/// `POMOREWARD_DATA_DIR` wins outright. Otherwise `~/.config/pomoreward/`,
/// or `~/.config/pomoreward-dev/` when `POMOREWARD_ENV=dev`.
///
/// # Errors
/// Returns an error if there is no home directory to fall back on, or if
/// creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("POMOREWARD_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir().ok_or(ConfigError::NoDataDir)?.join(".config");
            let env = std::env::var("POMOREWARD_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pomoreward-dev")
            } else {
                base_dir.join("pomoreward")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
