//! Project version tools

pub mod get;
pub mod list;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all version tools with the registry
pub fn register_version_tools(registry: &mut ToolRegistry) {
    registry.register(get::GetVersionTool::new());
    registry.register(list::ListProjectVersionsTool::new());
}
