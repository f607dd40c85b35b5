//! MCP (Model Context Protocol) tool surface
//!
//! Exposes the dispatcher as `tools/list` and `tools/call` handlers built
//! on the official rmcp model types. Wiring these handlers to a stdio or
//! HTTP server is left to the embedding binary.
//!
//! # Example
//!
//! ```rust,ignore
//! use regtrack_core::mcp::ToolServer;
//!
//! let server = ToolServer::new(dispatcher, transport, logger);
//! let tools = server.list_tools();
//! let result = server.call_tool("get_regulation", Some(args)).await;
//! ```

mod server;

pub use server::{result_text, ToolServer};

// Re-export rmcp types that consumers might need
pub use rmcp::model::{CallToolResult as McpToolResult, JsonObject, Tool as McpTool};
