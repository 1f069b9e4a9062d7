//! Workflow status tools

pub mod list;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all status tools with the registry
pub fn register_status_tools(registry: &mut ToolRegistry) {
    registry.register(list::ListStatusesTool::new());
}
