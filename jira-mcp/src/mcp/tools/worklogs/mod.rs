//! Worklog tools

pub mod add;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all worklog tools with the registry
pub fn register_worklog_tools(registry: &mut ToolRegistry) {
    registry.register(add::AddWorklogTool::new());
}
