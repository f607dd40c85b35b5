//! Adapter between regtrack types and genai types
//!
//! Tool-use and tool-result parts are flattened into text so that every
//! genai backend receives a plain system/user/assistant transcript.

use std::future::Future;
use std::pin::Pin;

use genai::chat::{
    ChatMessage as GenaiMessage, ChatOptions as GenaiOptions, ChatRole as GenaiRole,
    MessageContent as GenaiContent, Tool as GenaiTool, ToolCall as GenaiToolCall,
};
use genai::resolver::{AuthData, AuthResolver, Endpoint, ServiceTargetResolver};
use genai::{adapter::AdapterKind, Client, ModelIden, ServiceTarget};

use crate::types::{ChatMessage, ContentPart, MessageContent, MessageRole, Tool, ToolCall};
use super::traits::CompletionOptions;

/// Convert a regtrack role to a genai role
///
/// Tool results are replayed as user turns.
pub fn to_genai_role(role: MessageRole) -> GenaiRole {
    match role {
        MessageRole::System => GenaiRole::System,
        MessageRole::User | MessageRole::Tool => GenaiRole::User,
        MessageRole::Assistant => GenaiRole::Assistant,
    }
}

fn flatten_part(part: &ContentPart) -> String {
    match part {
        ContentPart::Text { text } => text.clone(),
        ContentPart::ToolUse { id, name, input } => {
            format!("[Tool call {}]: {}({})", id, name, input)
        }
        ContentPart::ToolResult {
            tool_use_id,
            content,
            is_error,
        } => {
            if *is_error {
                format!("[Tool error for {}]: {}", tool_use_id, content)
            } else {
                format!("[Tool result for {}]: {}", tool_use_id, content)
            }
        }
    }
}

/// Convert a regtrack ChatMessage to a genai ChatMessage
pub fn to_genai_message(msg: &ChatMessage) -> GenaiMessage {
    let text = match &msg.content {
        MessageContent::Text(text) => text.clone(),
        MessageContent::Parts(parts) => parts.iter().map(flatten_part).collect::<Vec<_>>().join("\n"),
    };
    let content = GenaiContent::from(text);

    match to_genai_role(msg.role) {
        GenaiRole::System => GenaiMessage::system(content),
        GenaiRole::Assistant => GenaiMessage::assistant(content),
        _ => GenaiMessage::user(content),
    }
}

/// Convert a conversation to genai messages
pub fn to_genai_messages(messages: &[ChatMessage]) -> Vec<GenaiMessage> {
    messages.iter().map(to_genai_message).collect()
}

/// Convert a regtrack Tool to a genai Tool
pub fn to_genai_tool(tool: &Tool) -> GenaiTool {
    let mut genai_tool = GenaiTool::new(&tool.name).with_description(&tool.description);

    if let Some(schema) = &tool.input_schema {
        genai_tool = genai_tool.with_schema(schema.clone());
    }

    genai_tool
}

pub fn to_genai_tools(tools: &[Tool]) -> Vec<GenaiTool> {
    tools.iter().map(to_genai_tool).collect()
}

/// Convert completion options to genai ChatOptions
pub fn to_genai_options(options: &CompletionOptions) -> GenaiOptions {
    let mut genai_opts = GenaiOptions::default();

    if let Some(temp) = options.temperature {
        genai_opts = genai_opts.with_temperature(temp as f64);
    }

    if let Some(max_tokens) = options.max_tokens {
        genai_opts = genai_opts.with_max_tokens(max_tokens);
    }

    // Tool calls are only reported on the End event when captured
    genai_opts.with_capture_tool_calls(true)
}

/// Convert a genai ToolCall to a regtrack ToolCall
pub fn from_genai_tool_call(tc: &GenaiToolCall) -> ToolCall {
    ToolCall::new(tc.call_id.clone(), tc.fn_name.clone(), tc.fn_arguments.clone())
}

/// Routing and credentials for one genai client
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Provider identifier (e.g., "openai", "openrouter")
    pub provider: String,
    /// Explicit API key; when unset genai's default lookup applies
    pub api_key: Option<String>,
    /// Custom API base URL for OpenAI-compatible endpoints
    pub api_base: Option<String>,
}

/// Endpoint for providers reached through the OpenAI-compatible protocol
fn compat_endpoint(provider: &str, api_base: Option<&str>) -> Option<Endpoint> {
    if let Some(base) = api_base {
        return Some(Endpoint::from_owned(base.to_string()));
    }
    match provider {
        "openrouter" => Some(Endpoint::from_static("https://openrouter.ai/api/v1/")),
        "mistral" => Some(Endpoint::from_static("https://api.mistral.ai/v1/")),
        _ => None,
    }
}

/// Create a genai Client with explicit auth and endpoint resolution
pub fn create_client(config: &ProviderConfig) -> Client {
    let explicit_key = config.api_key.clone();
    let auth_resolver = AuthResolver::from_resolver_async_fn(
        move |_model_iden: ModelIden| -> Pin<Box<dyn Future<Output = genai::resolver::Result<Option<AuthData>>> + Send>> {
            let key = explicit_key.clone();
            Box::pin(async move { Ok(key.map(AuthData::from_single)) })
        },
    );

    let provider = config.provider.to_lowercase();
    let api_base = config.api_base.clone();
    let target_resolver = ServiceTargetResolver::from_resolver_fn(
        move |target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
            let Some(endpoint) = compat_endpoint(&provider, api_base.as_deref()) else {
                return Ok(target);
            };
            let model = ModelIden::new(AdapterKind::OpenAI, target.model.model_name.clone());
            Ok(ServiceTarget {
                endpoint,
                auth: target.auth,
                model,
            })
        },
    );

    Client::builder()
        .with_auth_resolver(auth_resolver)
        .with_service_target_resolver(target_resolver)
        .build()
}
