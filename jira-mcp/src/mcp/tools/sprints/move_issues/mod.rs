//! Move issues into a sprint

use crate::mcp::shared_utils::{McpErrorHandler, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::MoveIssuesToSprintRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Largest batch the Agile API accepts
pub const MAX_ISSUES_PER_MOVE: usize = 50;

/// Tool for moving issues into a sprint
#[derive(Default)]
pub struct MoveIssuesToSprintTool;

impl MoveIssuesToSprintTool {
    /// Creates a new instance of the MoveIssuesToSprintTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for MoveIssuesToSprintTool {
    fn name(&self) -> &'static str {
        "jira_move_issues_to_sprint"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("sprints", "move_issues")
            .unwrap_or("Tool description not available")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for::<MoveIssuesToSprintRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: MoveIssuesToSprintRequest = BaseToolImpl::parse_arguments(arguments)?;
        let sprint_id = McpValidation::parse_id(&request.sprint_id, "sprint_id")
            .map_err(|e| McpErrorHandler::handle_error(e, "validate sprint id"))?;
        let issue_keys = McpValidation::split_list(&request.issue_keys);
        McpValidation::validate_item_count(issue_keys.len(), "issue key", MAX_ISSUES_PER_MOVE)
            .map_err(|e| McpErrorHandler::handle_error(e, "validate issue keys"))?;

        McpErrorHandler::handle_result(
            context
                .client
                .move_issues_to_sprint(sprint_id, &issue_keys)
                .await,
            "move issues to sprint",
        )?;
        tracing::info!("Moved {} issues to sprint {}", issue_keys.len(), sprint_id);

        Ok(BaseToolImpl::create_success_response(format!(
            "Successfully moved {} issue(s) to sprint {}:\nIssues moved: {}\n\nSprint ID: {}\nOperation completed successfully.",
            issue_keys.len(),
            sprint_id,
            issue_keys.join(", "),
            sprint_id
        )))
    }
}
