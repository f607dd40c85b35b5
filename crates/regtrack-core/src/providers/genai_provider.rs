//! GenaiProvider - completion provider backed by the genai crate

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use genai::chat::{ChatRequest, ChatStreamEvent};

use crate::logging::Logger;
use crate::{log_debug, log_error, log_info};
use crate::types::ChatMessage;
use super::error::{ProviderError, ProviderResult};
use super::genai_adapter::{
    create_client, from_genai_tool_call, to_genai_messages, to_genai_options, to_genai_tools, ProviderConfig,
};
use super::traits::{Completion, CompletionOptions, Provider};

/// Provider for every genai-supported LLM API
///
/// Streams the response and collects text chunks and captured tool calls
/// into a single [`Completion`].
pub struct GenaiProvider {
    config: ProviderConfig,
    model: String,
    logger: Arc<dyn Logger>,
}

impl GenaiProvider {
    pub fn new(config: ProviderConfig, model: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self {
            config,
            model: model.into(),
            logger,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Extract model name from a model string (e.g., "openai/gpt-4o" -> "gpt-4o")
    pub fn extract_model_name(model: &str) -> &str {
        model.split_once('/').map(|(_, name)| name).unwrap_or(model)
    }
}

#[async_trait]
impl Provider for GenaiProvider {
    fn name(&self) -> &str {
        &self.config.provider
    }

    async fn complete(&self, messages: &[ChatMessage], options: CompletionOptions) -> ProviderResult<Completion> {
        let model_name = Self::extract_model_name(&self.model);
        log_info!(
            self.logger,
            "[GenaiProvider] complete: provider={}, model={}, messages={}",
            self.config.provider,
            model_name,
            messages.len()
        );

        let client = create_client(&self.config);
        let mut chat_req = ChatRequest::new(to_genai_messages(messages));
        if let Some(tools) = &options.tools {
            chat_req = chat_req.with_tools(to_genai_tools(tools));
        }
        let genai_options = to_genai_options(&options);

        let chat_stream = client
            .exec_chat_stream(model_name, chat_req, Some(&genai_options))
            .await
            .map_err(|e| ProviderError::api_error(&self.config.provider, 500, e.to_string()))?;

        let mut stream = chat_stream.stream;
        let mut completion = Completion::default();
        let mut ended = false;

        while let Some(event) = stream.next().await {
            let event = event.map_err(|e| {
                log_error!(self.logger, "[GenaiProvider] Stream error: {}", e);
                ProviderError::api_error(&self.config.provider, 500, e.to_string())
            })?;

            match event {
                ChatStreamEvent::Chunk(chunk) => completion.text.push_str(&chunk.content),
                ChatStreamEvent::End(end) => {
                    if let Some(tool_calls) = end.captured_tool_calls() {
                        completion
                            .tool_calls
                            .extend(tool_calls.iter().map(|tc| from_genai_tool_call(tc)));
                    }
                    ended = true;
                }
                _ => {}
            }
        }

        if !ended {
            return Err(ProviderError::StreamEnded);
        }

        log_debug!(
            self.logger,
            "[GenaiProvider] Completion: {} chars, {} tool calls",
            completion.text.len(),
            completion.tool_calls.len()
        );
        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;

    #[test]
    fn test_extract_model_name() {
        assert_eq!(GenaiProvider::extract_model_name("openai/gpt-4o"), "gpt-4o");
        assert_eq!(GenaiProvider::extract_model_name("gpt-4o-mini"), "gpt-4o-mini");
    }

    #[test]
    fn test_name_is_provider() {
        let provider = GenaiProvider::new(
            ProviderConfig {
                provider: "anthropic".into(),
                ..ProviderConfig::default()
            },
            "claude-3-5-haiku-latest",
            Arc::new(NoOpLogger::new()),
        );
        assert_eq!(provider.name(), "anthropic");
        assert_eq!(provider.model(), "claude-3-5-haiku-latest");
    }
}
