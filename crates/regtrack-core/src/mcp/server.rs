//! Protocol-facing tool server

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject, RawContent, Tool};
use serde_json::Value;

use crate::catalog::ToolDescriptor;
use crate::dispatch::Dispatcher;
use crate::logging::Logger;
use crate::{log_info, log_warn};
use crate::transport::Transport;

/// Serves the tool catalog to protocol clients
///
/// Every call produces a result; failures are reported as error results
/// rather than protocol errors.
pub struct ToolServer {
    dispatcher: Arc<Dispatcher>,
    transport: Arc<dyn Transport>,
    logger: Arc<dyn Logger>,
}

impl ToolServer {
    pub fn new(dispatcher: Arc<Dispatcher>, transport: Arc<dyn Transport>, logger: Arc<dyn Logger>) -> Self {
        Self {
            dispatcher,
            transport,
            logger,
        }
    }

    /// `tools/list`: every tool in declaration order
    pub fn list_tools(&self) -> Vec<Tool> {
        self.dispatcher.list_tools().iter().map(to_mcp_tool).collect()
    }

    /// `tools/call`: execute a tool, returning its result as text content
    pub async fn call_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        log_info!(self.logger, "[ToolServer] tools/call {}", name);
        let arguments = arguments.map(Value::Object).unwrap_or(Value::Null);

        match self.dispatcher.execute(name, arguments, self.transport.as_ref()).await {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(e) => {
                log_warn!(self.logger, "[ToolServer] {} failed: {}", name, e);
                CallToolResult::error(vec![Content::text(format!("Error: {}", e))])
            }
        }
    }
}

fn to_mcp_tool(descriptor: &ToolDescriptor) -> Tool {
    let schema = match descriptor.input_schema() {
        Value::Object(map) => map,
        _ => JsonObject::new(),
    };
    Tool::new(descriptor.name.clone(), descriptor.description.clone(), Arc::new(schema))
}

/// Concatenated text content of a tool result
pub fn result_text(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .filter_map(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.clone()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}
