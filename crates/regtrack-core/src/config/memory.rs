//! In-memory settings provider

use parking_lot::RwLock;

use super::settings::RegtrackConfig;
use super::traits::{ConfigResult, SettingsProvider};

/// Holds settings in memory
#[derive(Debug, Default)]
pub struct MemoryConfigProvider {
    config: RwLock<RegtrackConfig>,
}

impl MemoryConfigProvider {
    pub fn new(config: RegtrackConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }
}

impl SettingsProvider for MemoryConfigProvider {
    fn settings(&self) -> ConfigResult<RegtrackConfig> {
        Ok(self.config.read().clone())
    }

    fn update(&self, config: RegtrackConfig) -> ConfigResult<()> {
        config.validate()?;
        *self.config.write() = config;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_provider_update() {
        let provider = MemoryConfigProvider::default();
        assert_eq!(provider.settings().unwrap().agent.model, "gpt-4o-mini");

        let mut config = RegtrackConfig::default();
        config.agent.model = "claude-3-5-haiku-latest".to_string();
        config.agent.provider = "anthropic".to_string();
        provider.update(config).unwrap();

        let settings = provider.settings().unwrap();
        assert_eq!(settings.agent.provider, "anthropic");
    }

    #[test]
    fn test_memory_provider_rejects_invalid() {
        let provider = MemoryConfigProvider::default();
        let mut config = RegtrackConfig::default();
        config.api.base_url = "  ".to_string();
        assert!(provider.update(config).is_err());
        assert_eq!(provider.settings().unwrap(), RegtrackConfig::default());
    }
}
