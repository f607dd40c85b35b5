//! Tool dispatcher
//!
//! The Dispatcher is the central component for:
//! - Looking tools up in the catalog
//! - Validating model-generated arguments against the declared schema
//! - Running the per-tool transform rule to build a remote call
//! - Invoking the transport and rendering the result as text

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::catalog::{CatalogResult, ToolCatalog, ToolDescriptor};
use crate::logging::Logger;
use crate::{log_debug, log_info, log_warn};
use crate::tools::{builtin_tools, ToolDefinition, TransformRule};
use crate::transport::Transport;
use crate::types::{Tool, ToolCall, ToolResult};
use crate::validation::{validate, ValidationResult, ValueKind, Violation};
use super::error::{DispatchError, DispatchResult};
use super::remote::RemoteCallSpec;

/// Resolves tool calls into remote requests and executes them
pub struct Dispatcher {
    catalog: ToolCatalog,
    rules: HashMap<String, TransformRule>,
    logger: Arc<dyn Logger>,
}

impl Dispatcher {
    /// Create a dispatcher over a set of tool definitions
    ///
    /// Fails when two definitions share a name.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = ToolDefinition>,
        logger: Arc<dyn Logger>,
    ) -> CatalogResult<Self> {
        let mut descriptors = Vec::new();
        let mut rules = HashMap::new();
        for definition in definitions {
            rules.insert(definition.descriptor.name.clone(), definition.rule);
            descriptors.push(definition.descriptor);
        }
        let catalog = ToolCatalog::new(descriptors)?;
        log_debug!(logger, "[Dispatcher] Registered {} tools", catalog.len());
        Ok(Self {
            catalog,
            rules,
            logger,
        })
    }

    /// Create a dispatcher over the built-in regulatory tool catalog
    pub fn builtin(logger: Arc<dyn Logger>) -> CatalogResult<Self> {
        Self::from_definitions(builtin_tools().iter().cloned(), logger)
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// All descriptors in declaration order
    pub fn list_tools(&self) -> &[ToolDescriptor] {
        self.catalog.list_tools()
    }

    pub fn find_tool(&self, name: &str) -> Option<&ToolDescriptor> {
        self.catalog.find_tool(name)
    }

    /// Tools in the shape presented to a model
    pub fn model_tools(&self) -> Vec<Tool> {
        self.catalog.model_tools()
    }

    /// Validate arguments and build the remote call without performing it
    pub fn resolve(&self, name: &str, arguments: Value) -> DispatchResult<RemoteCallSpec> {
        let descriptor = self
            .catalog
            .find_tool(name)
            .ok_or_else(|| DispatchError::UnknownTool(name.to_string()))?;
        let rule = self
            .rules
            .get(name)
            .ok_or_else(|| DispatchError::UnknownTool(name.to_string()))?;

        let args = match arguments {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            other => {
                return Err(DispatchError::invalid(
                    name,
                    Violation::Malformed {
                        detail: format!("arguments must be an object, got {}", ValueKind::of(&other)),
                    },
                ))
            }
        };

        if let ValidationResult::Invalid(violations) = validate(name, &args, &descriptor.params) {
            return Err(DispatchError::InvalidInput {
                tool: name.to_string(),
                violations,
            });
        }

        rule(&args).map_err(|e| e.into_dispatch(name))
    }

    /// Execute a tool and return its result as text
    ///
    /// String results are returned as-is; anything else is rendered as
    /// compact JSON.
    pub async fn execute(&self, name: &str, arguments: Value, transport: &dyn Transport) -> DispatchResult<String> {
        let spec = self.resolve(name, arguments)?;
        log_info!(
            self.logger,
            "[Dispatcher] {} -> {} {}",
            name, spec.method, spec.path
        );

        let (path, query, options) = spec.into_parts();
        let value = transport.call(&path, &query, options).await?;
        render(value)
    }

    /// Execute a tool call, converting every failure into an error result
    pub async fn execute_call(&self, call: &ToolCall, transport: &dyn Transport) -> ToolResult {
        match self.execute(&call.name, call.input.clone(), transport).await {
            Ok(content) => ToolResult::success(&call.id, content),
            Err(e) => {
                log_warn!(self.logger, "[Dispatcher] Tool {} failed: {}", call.name, e);
                ToolResult::error(&call.id, format!("Error: {}", e))
            }
        }
    }
}

fn render(value: Value) -> DispatchResult<String> {
    match value {
        Value::String(text) => Ok(text),
        other => Ok(serde_json::to_string(&other)?),
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("tools", &self.catalog.len())
            .finish()
    }
}
