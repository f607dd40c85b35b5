//! Settings model

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::agent::{AgentOptions, ToolExposure};
use super::traits::{ConfigError, ConfigResult};

/// Top-level configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RegtrackConfig {
    /// Remote API connection
    #[serde(default)]
    pub api: ApiSettings,

    /// Conversational loop
    #[serde(default)]
    pub agent: AgentSettings,
}

impl RegtrackConfig {
    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> ConfigResult<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "api.base_url".into(),
                message: "must not be empty".into(),
            });
        }
        if self.agent.max_rounds == 0 {
            return Err(ConfigError::Invalid {
                field: "agent.max_rounds".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// Connection settings for the remote regulatory API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiSettings {
    /// Base URL every tool path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Name of the environment variable holding the bearer token; an
    /// explicit `null` disables authentication
    #[serde(default = "default_api_key_env")]
    pub api_key_env: Option<String>,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiSettings {
    /// Bearer token read from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        self.api_key_env
            .as_deref()
            .and_then(|name| std::env::var(name).ok())
            .filter(|key| !key.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Settings for the conversational loop and its model provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentSettings {
    /// Provider name (e.g., "openai", "anthropic", "ollama")
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model identifier as used by the provider
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the provider API key; unset means the
    /// provider's conventional variable (e.g. OPENAI_API_KEY)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Base URL for OpenAI-compatible endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,

    /// Execute the tool calls of one round concurrently
    #[serde(default = "default_true")]
    pub parallel_tools: bool,

    #[serde(default)]
    pub tool_exposure: ToolExposure,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Wall-clock limit for a whole conversation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key_env: None,
            api_base: None,
            max_rounds: default_max_rounds(),
            parallel_tools: true,
            tool_exposure: ToolExposure::default(),
            system_prompt: None,
            temperature: None,
            timeout_secs: None,
        }
    }
}

impl AgentSettings {
    /// Provider API key from the configured environment variable
    pub fn provider_api_key(&self) -> Option<String> {
        self.api_key_env
            .as_deref()
            .and_then(|name| std::env::var(name).ok())
            .filter(|key| !key.is_empty())
    }

    /// Loop options derived from these settings
    pub fn agent_options(&self) -> AgentOptions {
        AgentOptions {
            max_rounds: self.max_rounds,
            parallel_tools: self.parallel_tools,
            tool_exposure: self.tool_exposure,
            temperature: self.temperature,
            max_tokens: None,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/v1".to_string()
}

fn default_api_key_env() -> Option<String> {
    Some("REGTRACK_API_KEY".to_string())
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_rounds() -> u32 {
    8
}

fn default_true() -> bool {
    true
}
