//! Conversational agent loop
//!
//! Runs bounded rounds of (completion -> tool execution -> feedback) until
//! the model answers without requesting tools or the round budget runs out.

mod agent_loop;
mod conversation;

pub use agent_loop::{AgentError, AgentLoop, AgentOptions, AgentResult, RunOutcome, TerminationReason, ToolExposure};
pub use conversation::ConversationState;
