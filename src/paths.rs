//! Centralized path resolution for storinfo
//!
//! # Environment Variables
//!
//! - `STORINFO_CONFIG_DIR` - Override config directory
//! - `STORINFO_ROOT` - Override the storage root queried by default
//!
//! # Path Resolution Priority
//!
//! For config_dir():
//! 1. `STORINFO_CONFIG_DIR` environment variable
//! 2. `XDG_CONFIG_HOME/storinfo` (if set)
//! 3. Platform default:
//!    - Windows: `%APPDATA%\storinfo`
//!    - macOS/Linux: `~/.config/storinfo`

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable for config directory override
pub const ENV_CONFIG_DIR: &str = "STORINFO_CONFIG_DIR";

/// Environment variable for default storage root override
pub const ENV_ROOT: &str = "STORINFO_ROOT";

/// Config file name inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Get the storinfo config directory path
///
/// Priority:
/// 1. `STORINFO_CONFIG_DIR` env var
/// 2. `XDG_CONFIG_HOME/storinfo`
/// 3. Platform default
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = expand(&dir);
        log::debug!(
            "Using config dir from {}: {}",
            ENV_CONFIG_DIR,
            path.display()
        );
        return Ok(path);
    }

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg_config).join("storinfo");
        log::debug!("Using XDG_CONFIG_HOME: {}", path.display());
        return Ok(path);
    }

    #[cfg(windows)]
    {
        if let Some(app_data) = dirs::config_dir() {
            let path = app_data.join("storinfo");
            log::debug!("Using Windows config dir: {}", path.display());
            return Ok(path);
        }
    }

    // Unix default: ~/.config/storinfo
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let path = home.join(".config").join("storinfo");
    log::debug!("Using default config dir: {}", path.display());
    Ok(path)
}

/// Get the config file path
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Storage root from `STORINFO_ROOT`, if set and non-empty
pub fn root_from_env() -> Option<PathBuf> {
    std::env::var(ENV_ROOT)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(|v| expand(&v))
}

/// Expand ~ and environment variables in a path string.
///
/// # Examples
///
/// ```ignore
/// let data = paths::expand("~/data");
/// let var_path = paths::expand("$HOME/data");
/// ```
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}

// ============================================================================
// Tests
// ============================================================================
