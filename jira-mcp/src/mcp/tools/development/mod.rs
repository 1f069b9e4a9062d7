//! Development information tools

pub mod get;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all development information tools with the registry
pub fn register_development_tools(registry: &mut ToolRegistry) {
    registry.register(get::GetDevelopmentInformationTool::new());
}
