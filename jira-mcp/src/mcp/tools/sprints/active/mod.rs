//! Active sprint tool

use super::{resolve_board_ids, sprint_date};
use crate::client::Sprint;
use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::BoardOrProjectRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for finding the active sprint
#[derive(Default)]
pub struct GetActiveSprintTool;

impl GetActiveSprintTool {
    /// Creates a new instance of the GetActiveSprintTool
    pub fn new() -> Self {
        Self
    }
}

pub fn format_active_sprint(sprint: &Sprint, board_id: i64) -> String {
    format!(
        "Active Sprint:\nID: {}\nName: {}\nState: {}\nStartDate: {}\nEndDate: {}\nBoard ID: {}\nGoal: {}",
        sprint.id,
        sprint.name,
        sprint.state,
        sprint_date(sprint.start_date.as_deref()),
        sprint_date(sprint.end_date.as_deref()),
        board_id,
        sprint.goal.as_deref().unwrap_or("")
    )
}

#[async_trait]
impl McpTool for GetActiveSprintTool {
    fn name(&self) -> &'static str {
        "jira_get_active_sprint"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("sprints", "active")
            .unwrap_or("Tool description not available")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for::<BoardOrProjectRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: BoardOrProjectRequest = BaseToolImpl::parse_arguments(arguments)?;
        let board_ids = resolve_board_ids(&context.client, &request)
            .await
            .map_err(|e| McpErrorHandler::handle_error(e, "resolve boards"))?;

        for board_id in board_ids {
            let sprints = match context.client.list_board_sprints(board_id, &["active"]).await {
                Ok(sprints) => sprints,
                // A board that answered with an error status fails the call;
                // one that could not be reached is skipped.
                Err(err) if err.status().is_some() => {
                    return McpErrorHandler::handle_result(Err(err), "get active sprint");
                }
                Err(err) => {
                    tracing::warn!("Skipping board {}: {}", board_id, err);
                    continue;
                }
            };

            if let Some(sprint) = sprints.first() {
                return Ok(BaseToolImpl::create_success_response(
                    format_active_sprint(sprint, board_id),
                ));
            }
        }

        Ok(BaseToolImpl::create_success_response(
            "No active sprint found.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_active_sprint() {
        let sprint = Sprint {
            id: 8,
            name: "Sprint 8".to_string(),
            state: "active".to_string(),
            goal: Some("Stabilise".to_string()),
            ..Default::default()
        };
        assert_eq!(
            format_active_sprint(&sprint, 2),
            "Active Sprint:\nID: 8\nName: Sprint 8\nState: active\nStartDate: Not set\nEndDate: Not set\nBoard ID: 2\nGoal: Stabilise"
        );
    }
}
