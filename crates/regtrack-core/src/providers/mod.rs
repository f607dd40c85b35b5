//! Model-completion providers
//!
//! All real backends go through the `genai` crate, which handles streaming,
//! provider protocols and tool calling. OpenAI-compatible endpoints
//! (OpenRouter, Mistral, self-hosted) are routed with a custom base URL.
//!
//! The `MockProvider` plays back scripted completions for tests.

mod error;
mod genai_adapter;
mod genai_provider;
mod mock;
mod traits;

pub use error::{ProviderError, ProviderResult};
pub use genai_adapter::ProviderConfig;
pub use genai_provider::GenaiProvider;
pub use mock::{MockProvider, RecordedRequest};
pub use traits::{Completion, CompletionOptions, Provider};

use std::sync::Arc;

use crate::config::AgentSettings;
use crate::logging::Logger;

/// Create the provider named in the agent settings
///
/// `mock` yields an echoing [`MockProvider`]; every other name is routed
/// through [`GenaiProvider`].
pub fn create_provider(settings: &AgentSettings, logger: Arc<dyn Logger>) -> Box<dyn Provider> {
    match settings.provider.to_lowercase().as_str() {
        "mock" => Box::new(MockProvider::new(logger)),
        _ => {
            let config = ProviderConfig {
                provider: settings.provider.clone(),
                api_key: settings.provider_api_key(),
                api_base: settings.api_base.clone(),
            };
            Box::new(GenaiProvider::new(config, settings.model.clone(), logger))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;

    #[test]
    fn test_create_provider() {
        let mut settings = AgentSettings::default();
        let provider = create_provider(&settings, Arc::new(NoOpLogger::new()));
        assert_eq!(provider.name(), "openai");

        settings.provider = "mock".into();
        let provider = create_provider(&settings, Arc::new(NoOpLogger::new()));
        assert_eq!(provider.name(), "mock");
    }
}
