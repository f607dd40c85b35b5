//! Settings provider trait

use super::settings::RegtrackConfig;

/// Source of [`RegtrackConfig`]
///
/// Implementations:
/// - `MemoryConfigProvider`: In-memory for testing
/// - `FileConfigProvider`: Reads from YAML file (~/.config/regtrack/config.yaml)
pub trait SettingsProvider: Send + Sync {
    /// Current settings
    fn settings(&self) -> ConfigResult<RegtrackConfig>;

    /// Replace the settings
    fn update(&self, config: RegtrackConfig) -> ConfigResult<()>;
}

/// Errors that can occur during configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid setting `{field}`: {message}")]
    Invalid { field: String, message: String },

    #[error("Configuration error: {0}")]
    Other(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
