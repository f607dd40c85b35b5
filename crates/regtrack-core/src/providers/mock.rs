//! Mock provider for testing
//!
//! Plays back a script of completions without network access and records
//! every request so tests can assert on what the loop sent.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{ProviderError, ProviderResult};
use super::traits::{Completion, CompletionOptions, Provider};
use crate::logging::Logger;
use crate::log_debug;
use crate::types::{ChatMessage, MessageRole, ToolCall};

/// One scripted step
#[derive(Debug, Clone)]
enum Step {
    Complete(Completion),
    Fail(String),
}

/// What the mock observed for one request
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Number of messages in the conversation
    pub message_count: usize,
    /// Names of the tools offered, if any
    pub tool_names: Option<Vec<String>>,
    pub last_message: Option<ChatMessage>,
}

impl RecordedRequest {
    pub fn offered_tools(&self) -> bool {
        self.tool_names.is_some()
    }
}

/// Mock LLM provider for testing
///
/// When the script runs out the mock either repeats the last scripted step
/// (see [`repeating`](Self::repeating)) or echoes the last user message as a
/// final answer.
pub struct MockProvider {
    script: Mutex<VecDeque<Step>>,
    last: Mutex<Option<Step>>,
    repeat_last: bool,
    requests: Mutex<Vec<RecordedRequest>>,
    logger: Arc<dyn Logger>,
}

impl MockProvider {
    /// Create a mock with an empty script (echo mode)
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            last: Mutex::new(None),
            repeat_last: false,
            requests: Mutex::new(Vec::new()),
            logger,
        }
    }

    /// Append a scripted completion
    pub fn then(self, completion: Completion) -> Self {
        self.script.lock().push_back(Step::Complete(completion));
        self
    }

    /// Append a final text answer
    pub fn then_text(self, text: impl Into<String>) -> Self {
        self.then(Completion::text(text))
    }

    /// Append a turn requesting the given tool calls
    pub fn then_tool_calls(self, calls: Vec<ToolCall>) -> Self {
        self.then(Completion::tool_calls(calls))
    }

    /// Append a failure
    pub fn then_error(self, message: impl Into<String>) -> Self {
        self.script.lock().push_back(Step::Fail(message.into()));
        self
    }

    /// Keep answering with the last scripted step once the script is exhausted
    pub fn repeating(mut self) -> Self {
        self.repeat_last = true;
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    fn next_step(&self, messages: &[ChatMessage]) -> Step {
        if let Some(step) = self.script.lock().pop_front() {
            *self.last.lock() = Some(step.clone());
            return step;
        }
        if self.repeat_last {
            if let Some(step) = self.last.lock().clone() {
                return step;
            }
        }
        let echo = messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(ChatMessage::plain_text)
            .unwrap_or_default();
        Step::Complete(Completion::text(echo))
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, messages: &[ChatMessage], options: CompletionOptions) -> ProviderResult<Completion> {
        self.requests.lock().push(RecordedRequest {
            message_count: messages.len(),
            tool_names: options
                .tools
                .as_ref()
                .map(|tools| tools.iter().map(|t| t.name.clone()).collect()),
            last_message: messages.last().cloned(),
        });

        match self.next_step(messages) {
            Step::Complete(completion) => {
                log_debug!(
                    self.logger,
                    "[MockProvider] Returning completion with {} tool calls",
                    completion.tool_calls.len()
                );
                Ok(completion)
            }
            Step::Fail(message) => Err(ProviderError::api_error("mock", 500, message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::types::Tool;
    use serde_json::json;

    fn logger() -> Arc<dyn Logger> {
        Arc::new(NoOpLogger::new())
    }

    #[tokio::test]
    async fn test_plays_script_in_order() {
        let provider = MockProvider::new(logger())
            .then_tool_calls(vec![ToolCall::new("c1", "list_alerts", json!({}))])
            .then_text("done");

        let first = provider.complete(&[ChatMessage::user("hi")], CompletionOptions::new()).await.unwrap();
        assert!(first.has_tool_calls());
        let second = provider.complete(&[ChatMessage::user("hi")], CompletionOptions::new()).await.unwrap();
        assert_eq!(second.text, "done");
        assert!(!second.has_tool_calls());
    }

    #[tokio::test]
    async fn test_echo_when_exhausted() {
        let provider = MockProvider::new(logger());
        let completion = provider
            .complete(&[ChatMessage::system("sys"), ChatMessage::user("echo me")], CompletionOptions::new())
            .await
            .unwrap();
        assert_eq!(completion.text, "echo me");
    }

    #[tokio::test]
    async fn test_repeating() {
        let provider = MockProvider::new(logger())
            .then_tool_calls(vec![ToolCall::new("c1", "list_tags", json!({}))])
            .repeating();
        for _ in 0..3 {
            let completion = provider.complete(&[], CompletionOptions::new()).await.unwrap();
            assert_eq!(completion.tool_calls.len(), 1);
        }
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_records_tools_offered() {
        let provider = MockProvider::new(logger()).then_text("a").then_text("b");
        provider
            .complete(
                &[ChatMessage::user("x")],
                CompletionOptions::new().with_tools(vec![Tool::new("list_tags", "List tags")]),
            )
            .await
            .unwrap();
        provider.complete(&[ChatMessage::user("x")], CompletionOptions::new()).await.unwrap();

        let requests = provider.requests();
        assert_eq!(requests[0].tool_names.as_deref(), Some(&["list_tags".to_string()][..]));
        assert!(!requests[1].offered_tools());
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let provider = MockProvider::new(logger()).then_error("overloaded");
        let err = provider.complete(&[], CompletionOptions::new()).await.unwrap_err();
        assert!(err.to_string().contains("overloaded"));
    }
}
