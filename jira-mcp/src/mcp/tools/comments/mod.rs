//! Comment tools

pub mod add;
pub mod list;

use crate::client::User;
use crate::mcp::tool_registry::ToolRegistry;

/// Register all comment tools with the registry
pub fn register_comment_tools(registry: &mut ToolRegistry) {
    registry.register(add::AddCommentTool::new());
    registry.register(list::GetCommentsTool::new());
}

fn author_name(author: Option<&User>) -> &str {
    author.map(|a| a.display_name.as_str()).unwrap_or("Unknown")
}
