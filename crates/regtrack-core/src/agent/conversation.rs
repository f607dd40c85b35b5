//! Append-only conversation state

use crate::providers::Completion;
use crate::types::{ChatMessage, MessageRole, ToolResult};

/// Ordered transcript of one conversation
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    messages: Vec<ChatMessage>,
}

impl ConversationState {
    pub fn new(initial: Vec<ChatMessage>) -> Self {
        Self { messages: initial }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Record an assistant turn, including any tool-use parts
    pub fn record_completion(&mut self, completion: &Completion) {
        if completion.has_tool_calls() {
            self.push(ChatMessage::assistant_tool_calls(
                completion.text.clone(),
                &completion.tool_calls,
            ));
        } else {
            self.push(ChatMessage::assistant(completion.text.clone()));
        }
    }

    /// Record tool results in the given order
    pub fn record_results(&mut self, results: &[ToolResult]) {
        self.messages.extend(results.iter().map(ChatMessage::tool_result));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Most recent non-empty assistant text
    pub fn last_assistant_text(&self) -> Option<String> {
        self.messages
            .iter()
            .rev()
            .filter(|m| m.role == MessageRole::Assistant)
            .map(ChatMessage::plain_text)
            .find(|text| !text.trim().is_empty())
    }

    pub fn into_messages(self) -> Vec<ChatMessage> {
        self.messages
    }
}
