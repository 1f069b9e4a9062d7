//! Sprint tools backed by the Jira Agile API

pub mod active;
pub mod get;
pub mod list;
pub mod move_issues;
pub mod report;

use crate::client::JiraClient;
use crate::common::time::format_timestamp;
use crate::error::ErrorContext;
use crate::mcp::shared_utils::McpValidation;
use crate::mcp::tool_registry::ToolRegistry;
use crate::mcp::types::BoardOrProjectRequest;
use crate::{JiraMcpError, Result};

/// Register all sprint tools with the registry
pub fn register_sprint_tools(registry: &mut ToolRegistry) {
    registry.register(list::ListSprintsTool::new());
    registry.register(get::GetSprintTool::new());
    registry.register(active::GetActiveSprintTool::new());
    registry.register(move_issues::MoveIssuesToSprintTool::new());
    registry.register(report::SprintReportTool::new());
}

/// Boards to search: the given board, or every board of the given project
pub(crate) async fn resolve_board_ids(
    client: &JiraClient,
    request: &BoardOrProjectRequest,
) -> Result<Vec<i64>> {
    if let Some(board_id) = request.board_id.as_deref().filter(|b| !b.trim().is_empty()) {
        return Ok(vec![McpValidation::parse_id(board_id, "board_id")?]);
    }

    let Some(project_key) = request
        .project_key
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
    else {
        return Err(JiraMcpError::validation(
            "either board_id or project_key argument is required",
        ));
    };

    let boards = client
        .list_boards(project_key)
        .await
        .with_operation("get boards")?;
    if boards.is_empty() {
        return Err(JiraMcpError::validation(format!(
            "no boards found for project: {project_key}"
        )));
    }
    tracing::debug!("Project {} has {} boards", project_key, boards.len());
    Ok(boards.into_iter().map(|b| b.id).collect())
}

/// Sprint dates as `YYYY-MM-DD HH:MM:SS`, or `Not set`
pub(crate) fn sprint_date(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .map(format_timestamp)
        .unwrap_or_else(|| "Not set".to_string())
}
