//! Model Context Protocol (MCP) server support
//!
//! This module exposes the Jira tools and the built-in prompts through the
//! Model Context Protocol.

// Module declarations
pub mod prompts;
pub mod server;
pub mod shared_utils;
pub mod tool_descriptions;
pub mod tool_registry;
pub mod tools;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used items from submodules
pub use prompts::{PromptDefinition, PromptLibrary};
pub use server::McpServer;
pub use tool_registry::{create_tool_registry, McpTool, ToolContext, ToolRegistry};
