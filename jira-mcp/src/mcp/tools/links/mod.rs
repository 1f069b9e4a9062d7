//! Issue link tools

pub mod create;
pub mod related;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all link tools with the registry
pub fn register_link_tools(registry: &mut ToolRegistry) {
    registry.register(related::GetRelatedIssuesTool::new());
    registry.register(create::LinkIssuesTool::new());
}
