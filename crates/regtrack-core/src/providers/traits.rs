//! Provider trait definition

use async_trait::async_trait;

use crate::types::{ChatMessage, Tool, ToolCall};
use super::error::ProviderResult;

/// Options for a completion request
#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    /// Tools available for the model to use
    pub tools: Option<Vec<Tool>>,
    /// Temperature for response generation (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

impl CompletionOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set tools
    pub fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }
}

/// One model turn: free text plus any requested tool calls
#[derive(Debug, Clone, Default)]
pub struct Completion {
    pub text: String,
    /// Requested calls in the order the model emitted them
    pub tool_calls: Vec<ToolCall>,
}

impl Completion {
    /// A final answer without tool calls
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tool_calls: Vec::new(),
        }
    }

    /// A turn requesting tool calls
    pub fn tool_calls(calls: Vec<ToolCall>) -> Self {
        Self {
            text: String::new(),
            tool_calls: calls,
        }
    }

    /// Attach accompanying text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Model-completion port
///
/// Each backend (genai-routed APIs, the scripted mock) implements this trait.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn name(&self) -> &str;

    /// Produce the next assistant turn for a conversation
    async fn complete(&self, messages: &[ChatMessage], options: CompletionOptions) -> ProviderResult<Completion>;
}
