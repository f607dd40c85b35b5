//! Core types shared by the dispatcher, the providers and the agent loop

mod message;
mod tool;

pub use message::{ChatMessage, ContentPart, MessageRole, MessageContent};
pub use tool::{Tool, ToolCall, ToolResult};
