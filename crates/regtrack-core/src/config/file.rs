//! File-based configuration provider (YAML)

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use super::settings::RegtrackConfig;
use super::traits::{ConfigResult, SettingsProvider};

/// File-based configuration provider
///
/// Reads and writes [`RegtrackConfig`] as YAML. A missing file yields
/// defaults; the parsed file is cached until [`reload`](Self::reload).
///
/// # Example
///
/// ```no_run
/// use regtrack_core::config::{FileConfigProvider, SettingsProvider};
///
/// let config = FileConfigProvider::user().settings().unwrap();
/// println!("{}", config.api.base_url);
/// ```
pub struct FileConfigProvider {
    path: PathBuf,
    cache: RwLock<Option<RegtrackConfig>>,
}

impl FileConfigProvider {
    /// Create a new file config provider for a specific path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    /// Create a user-level config provider (~/.config/regtrack/config.yaml)
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("regtrack").join("config.yaml"))
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the config file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load config from file, bypassing the cache
    pub fn load(&self) -> ConfigResult<RegtrackConfig> {
        if !self.path.exists() {
            return Ok(RegtrackConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(RegtrackConfig::default());
        }
        let config: RegtrackConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, config: &RegtrackConfig) -> ConfigResult<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(config)?;
        fs::write(&self.path, content)?;

        *self.cache.write() = Some(config.clone());
        Ok(())
    }

    /// Reload config from disk (invalidate cache)
    pub fn reload(&self) -> ConfigResult<RegtrackConfig> {
        let config = self.load()?;
        *self.cache.write() = Some(config.clone());
        Ok(config)
    }
}

impl SettingsProvider for FileConfigProvider {
    fn settings(&self) -> ConfigResult<RegtrackConfig> {
        if let Some(config) = self.cache.read().as_ref() {
            return Ok(config.clone());
        }
        self.reload()
    }

    fn update(&self, config: RegtrackConfig) -> ConfigResult<()> {
        self.save(&config)
    }
}

impl std::fmt::Debug for FileConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfigProvider")
            .field("path", &self.path)
            .field("exists", &self.exists())
            .finish()
    }
}
