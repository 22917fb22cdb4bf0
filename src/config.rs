use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths;

// ============================================================================
// Config File
// ============================================================================

/// storinfo configuration (`config.toml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorinfoConfig {
    /// Storage root queried when no path is given
    #[serde(default = "default_root")]
    pub default_root: String,
}

impl Default for StorinfoConfig {
    fn default() -> Self {
        Self {
            default_root: default_root(),
        }
    }
}

/// Platform default storage root: the system drive
#[cfg(windows)]
fn default_root() -> String {
    let drive = std::env::var("SystemDrive").unwrap_or_else(|_| "C:".to_string());
    format!("{drive}\\")
}

/// Platform default storage root: the filesystem root
#[cfg(not(windows))]
fn default_root() -> String {
    "/".to_string()
}

impl StorinfoConfig {
    /// Load config from the default location, or defaults if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_file()?)
    }

    /// Load config from a specific file, or defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("Config file {} does not exist, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        log::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Get expanded default root path
    pub fn root_path(&self) -> PathBuf {
        paths::expand(&self.default_root)
    }
}

// ============================================================================
// Root Resolution
// ============================================================================

/// Pick the storage root to query.
///
/// Priority: explicit argument, then `STORINFO_ROOT`, then the config file.
pub fn resolve_root(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
    config: &StorinfoConfig,
) -> PathBuf {
    if let Some(path) = explicit {
        log::debug!("Using storage root from argument: {}", path.display());
        return path.to_path_buf();
    }

    if let Some(path) = from_env {
        log::debug!(
            "Using storage root from {}: {}",
            paths::ENV_ROOT,
            path.display()
        );
        return path;
    }

    let path = config.root_path();
    log::debug!("Using configured storage root: {}", path.display());
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = StorinfoConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, StorinfoConfig::default());
    }

    #[cfg(unix)]
    #[test]
    fn test_default_root_unix() {
        assert_eq!(StorinfoConfig::default().default_root, "/");
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = StorinfoConfig {
            default_root: "/mnt/data".to_string(),
        };
        config.save_to(&path).unwrap();

        let loaded = StorinfoConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_empty_file_uses_default_root() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let config = StorinfoConfig::load_from(&path).unwrap();
        assert_eq!(config.default_root, default_root());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_root = [").unwrap();

        let err = StorinfoConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_root_path_expands_tilde() {
        let config = StorinfoConfig {
            default_root: "~/data".to_string(),
        };
        let home = dirs::home_dir().unwrap();
        assert_eq!(config.root_path(), home.join("data"));
    }

    #[test]
    fn test_resolve_root_priority() {
        let config = StorinfoConfig {
            default_root: "/from/config".to_string(),
        };

        let explicit = resolve_root(
            Some(Path::new("/from/arg")),
            Some(PathBuf::from("/from/env")),
            &config,
        );
        assert_eq!(explicit, PathBuf::from("/from/arg"));

        let env = resolve_root(None, Some(PathBuf::from("/from/env")), &config);
        assert_eq!(env, PathBuf::from("/from/env"));

        let configured = resolve_root(None, None, &config);
        assert_eq!(configured, PathBuf::from("/from/config"));
    }
}
