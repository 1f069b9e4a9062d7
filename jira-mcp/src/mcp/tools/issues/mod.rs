//! Issue tools: read, create, update, search, transition and history
//!
//! Each tool is in its own submodule with dedicated implementation and description.

pub mod create;
pub mod create_child;
pub mod get;
pub mod history;
pub mod list_types;
pub mod search;
pub mod transition;
pub mod update;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all issue-related tools with the registry
pub fn register_issue_tools(registry: &mut ToolRegistry) {
    registry.register(get::GetIssueTool::new());
    registry.register(create::CreateIssueTool::new());
    registry.register(create_child::CreateChildIssueTool::new());
    registry.register(update::UpdateIssueTool::new());
    registry.register(list_types::ListIssueTypesTool::new());
    registry.register(search::SearchIssueTool::new());
    registry.register(transition::TransitionIssueTool::new());
    registry.register(history::IssueHistoryTool::new());
}
