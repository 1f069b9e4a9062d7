//! Sprint detail tool

use super::sprint_date;
use crate::client::Sprint;
use crate::mcp::shared_utils::{McpErrorHandler, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::SprintIdRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for reading one sprint
#[derive(Default)]
pub struct GetSprintTool;

impl GetSprintTool {
    /// Creates a new instance of the GetSprintTool
    pub fn new() -> Self {
        Self
    }
}

pub fn format_sprint_details(sprint: &Sprint) -> String {
    format!(
        "Sprint Details:\nID: {}\nName: {}\nState: {}\nStartDate: {}\nEndDate: {}\nCompleteDate: {}\nOriginBoardID: {}\nGoal: {}",
        sprint.id,
        sprint.name,
        sprint.state,
        sprint_date(sprint.start_date.as_deref()),
        sprint_date(sprint.end_date.as_deref()),
        sprint_date(sprint.complete_date.as_deref()),
        sprint
            .origin_board_id
            .map(|id| id.to_string())
            .unwrap_or_default(),
        sprint.goal.as_deref().unwrap_or("")
    )
}

#[async_trait]
impl McpTool for GetSprintTool {
    fn name(&self) -> &'static str {
        "jira_get_sprint"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("sprints", "get")
            .unwrap_or("Tool description not available")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for::<SprintIdRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: SprintIdRequest = BaseToolImpl::parse_arguments(arguments)?;
        let sprint_id = McpValidation::parse_id(&request.sprint_id, "sprint_id")
            .map_err(|e| McpErrorHandler::handle_error(e, "validate sprint id"))?;

        let sprint = McpErrorHandler::handle_result(
            context.client.get_sprint(sprint_id).await,
            "get sprint",
        )?;

        Ok(BaseToolImpl::create_success_response(format_sprint_details(
            &sprint,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::tools::test_support::{args, offline_context};
    use serde_json::json;

    #[test]
    fn test_format_sprint_details() {
        let sprint: Sprint = serde_json::from_value(json!({
            "id": 37,
            "name": "Sprint 37",
            "state": "closed",
            "startDate": "2024-01-01T09:00:00.000Z",
            "endDate": "2024-01-14T17:00:00.000Z",
            "completeDate": "2024-01-14T18:30:00.000Z",
            "originBoardId": 4,
            "goal": "Ship search"
        }))
        .unwrap();

        assert_eq!(
            format_sprint_details(&sprint),
            "Sprint Details:\nID: 37\nName: Sprint 37\nState: closed\n\
             StartDate: 2024-01-01 09:00:00\nEndDate: 2024-01-14 17:00:00\n\
             CompleteDate: 2024-01-14 18:30:00\nOriginBoardID: 4\nGoal: Ship search"
        );
    }

    #[tokio::test]
    async fn test_non_numeric_sprint_id_is_rejected() {
        let err = GetSprintTool::new()
            .execute(args(json!({ "sprint_id": "next" })), &offline_context())
            .await
            .unwrap_err();
        assert_eq!(err.message, "invalid sprint_id: next");
    }
}
