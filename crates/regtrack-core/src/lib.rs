//! Regtrack Core
//!
//! Tool catalog, dispatch pipeline and agent loop for a regulatory tracking
//! API. A language model sees the API as a set of named tools; this crate
//! validates the model's arguments, turns each call into an HTTP request
//! against the remote API, and feeds the results back to the model.
//!
//! ## Agent loop
//!
//! ```rust,ignore
//! use regtrack_core::{AgentLoop, Dispatcher, HttpTransport, create_provider};
//!
//! let dispatcher = Arc::new(Dispatcher::builtin(logger.clone())?);
//! let transport = Arc::new(HttpTransport::from_settings(&config.api, logger.clone())?);
//! let provider: Arc<dyn Provider> = create_provider(&config.agent, logger.clone()).into();
//!
//! let agent = AgentLoop::from_settings(&config.agent, dispatcher, provider, transport, logger);
//! let outcome = agent.ask("Which EU regulations changed last week?").await?;
//! println!("{}", outcome.final_text);
//! ```
//!
//! ## MCP surface
//!
//! [`mcp::ToolServer`] exposes the same catalog as `tools/list` and
//! `tools/call` handlers.

pub mod logging;
pub mod types;
pub mod config;
pub mod catalog;
pub mod validation;
pub mod transport;
pub mod dispatch;
pub mod tools;
pub mod providers;
pub mod agent;
pub mod mcp;

// Re-export commonly used types
pub use types::{ChatMessage, ContentPart, MessageContent, MessageRole, Tool, ToolCall, ToolResult};

pub use logging::{ConsoleLogger, Logger, NoOpLogger};

pub use config::{
    AgentSettings, ApiSettings, ConfigError, FileConfigProvider, MemoryConfigProvider, RegtrackConfig,
    SettingsProvider,
};

pub use catalog::{CatalogError, ParamKind, ParamSpec, ToolCatalog, ToolDescriptor};

pub use validation::{validate, ValidationResult, Violation};

pub use transport::{HttpMethod, HttpTransport, MockTransport, Transport, TransportError};

pub use dispatch::{DispatchError, Dispatcher, RemoteCallSpec};

pub use tools::{builtin_tools, ToolDefinition};

pub use providers::{create_provider, Completion, GenaiProvider, MockProvider, Provider, ProviderError};

pub use agent::{AgentError, AgentLoop, AgentOptions, RunOutcome, TerminationReason, ToolExposure};

pub use mcp::ToolServer;
