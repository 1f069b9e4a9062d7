//! Sprint listing tool

use super::{resolve_board_ids, sprint_date};
use crate::client::Sprint;
use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::BoardOrProjectRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Sprint states included in the listing
const LISTED_STATES: [&str; 2] = ["active", "future"];

/// Tool for listing open sprints
#[derive(Default)]
pub struct ListSprintsTool;

impl ListSprintsTool {
    /// Creates a new instance of the ListSprintsTool
    pub fn new() -> Self {
        Self
    }
}

/// Render one sprint found on `board_id`
pub fn format_sprint_entry(sprint: &Sprint, board_id: i64) -> String {
    format!(
        "ID: {}\nName: {}\nState: {}\nStartDate: {}\nEndDate: {}\nBoard ID: {}\n",
        sprint.id,
        sprint.name,
        sprint.state,
        sprint_date(sprint.start_date.as_deref()),
        sprint_date(sprint.end_date.as_deref()),
        board_id
    )
}

#[async_trait]
impl McpTool for ListSprintsTool {
    fn name(&self) -> &'static str {
        "jira_list_sprints"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("sprints", "list")
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

        let mut entries = Vec::new();
        for board_id in board_ids {
            let sprints = McpErrorHandler::handle_result(
                context
                    .client
                    .list_board_sprints(board_id, &LISTED_STATES)
                    .await,
                "get sprints",
            )?;
            entries.extend(sprints.iter().map(|s| format_sprint_entry(s, board_id)));
        }

        if entries.is_empty() {
            return Ok(BaseToolImpl::create_success_response("No sprints found."));
        }
        tracing::debug!("Found {} open sprints", entries.len());

        Ok(BaseToolImpl::create_success_response(entries.join("\n")))
    }
}
